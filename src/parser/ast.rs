use std::fmt;

use serde::Serialize;

use crate::lexer::Position;

/// Index of a node inside its [`SyntaxTree`].
///
/// Used for parent back-references: the tree owns every node, a `NodeId`
/// only names one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: Self = Self(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }
}

/// Coarse kind of a declaration, used to route nodes to rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    TranslationUnit,
    Namespace,
    Class,
    Struct,
    Union,
    Enum,
    EnumClass,
    Function,
    Variable,
    Macro,
    Alias,
    UsingDirective,
    UsingDeclaration,
    Include,
    Unparsed,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TranslationUnit => "translation-unit",
            Self::Namespace => "namespace",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::EnumClass => "enum-class",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Macro => "macro",
            Self::Alias => "alias",
            Self::UsingDirective => "using-directive",
            Self::UsingDeclaration => "using-declaration",
            Self::Include => "include",
            Self::Unparsed => "unparsed",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

impl Visibility {
    /// Position in the preferred section order: public, private, protected.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Public => 0,
            Self::Private => 1,
            Self::Protected => 2,
        }
    }

    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "protected" => Some(Self::Protected),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
        })
    }
}

/// Where an opening brace sits relative to the code that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BraceInfo {
    pub open: Position,
    pub close: Position,
    /// Only whitespace precedes the brace on its line
    pub own_line: bool,
}

impl BraceInfo {
    #[must_use]
    pub const fn is_single_line(&self) -> bool {
        self.open.line == self.close.line
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKey {
    Class,
    Struct,
    Union,
}

impl RecordKey {
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "class" => Some(Self::Class),
            "struct" => Some(Self::Struct),
            "union" => Some(Self::Union),
            _ => None,
        }
    }

    #[must_use]
    pub const fn default_visibility(self) -> Visibility {
        match self {
            Self::Class => Visibility::Private,
            Self::Struct | Self::Union => Visibility::Public,
        }
    }
}

/// One visibility block of a class body, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessSection {
    pub visibility: Visibility,
    /// `None` for the implicit section before the first label
    pub label: Option<Position>,
    pub members: Vec<NodeId>,
    /// Holds only aliases or inherited-constructor using-declarations, so
    /// it may appear out of order.
    pub exempt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDecl {
    pub key: RecordKey,
    pub bases: Vec<String>,
    pub sections: Vec<AccessSection>,
    pub body: BraceInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumerator {
    pub name: String,
    pub pos: Position,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDecl {
    pub scoped: bool,
    pub underlying: Option<String>,
    pub enumerators: Vec<Enumerator>,
    pub body: BraceInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionRole {
    Free,
    Method,
    Constructor,
    Destructor,
    Operator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Passing {
    Value,
    ConstRef,
    Ref,
    RvalueRef,
    Pointer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: Option<String>,
    /// Type with cv-qualifiers, references and pointers removed
    pub base_type: String,
    pub passing: Passing,
    pub pos: Position,
}

/// Line layout of a function signature, from the first token of the return
/// type (or declarator) to the last token before the body or `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignatureLayout {
    pub start: Position,
    pub end: Position,
    pub name_line: usize,
    /// Return type alone on the first line, the rest on the next one
    pub split_at_return_type: bool,
    /// Width of the signature collapsed onto one line, including indentation
    /// and terminator. `None` when comments make that meaningless.
    pub joined_width: Option<usize>,
}

impl SignatureLayout {
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }
}

/// Spacing around a control keyword's parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordSpacing {
    pub keyword: String,
    pub keyword_pos: Position,
    /// Text between keyword and `(`, when on the same line
    pub before_paren: Option<Gap>,
    /// Text between `)` and the next token, when on the same line
    pub after_paren: Option<Gap>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gap {
    pub pos: Position,
    pub text: String,
}

/// A braced body owned by a control statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlBlock {
    pub keyword: String,
    pub keyword_pos: Position,
    pub brace: BraceInfo,
    pub statement_count: usize,
    /// The only statement is an `if`, so braces prevent a dangling `else`
    pub single_statement_is_if: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionBody {
    pub brace: BraceInfo,
    pub statement_count: usize,
    pub blocks: Vec<ControlBlock>,
    pub spacing: Vec<KeywordSpacing>,
    /// Names assigned, incremented, moved from or mutated through a member call
    pub modified: Vec<String>,
    /// Names passed as a whole argument to some call, which may bind them by reference
    pub call_arguments: Vec<String>,
}

impl FunctionBody {
    #[must_use]
    pub fn modifies(&self, name: &str) -> bool {
        self.modified.iter().any(|m| m == name)
    }

    #[must_use]
    pub fn passes_to_call(&self, name: &str) -> bool {
        self.call_arguments.iter().any(|a| a == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDecl {
    pub qualifier: Option<String>,
    pub role: FunctionRole,
    pub return_type: Option<String>,
    pub params: Vec<Param>,
    pub template_params: Vec<String>,
    pub signature: SignatureLayout,
    pub body: Option<FunctionBody>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarScope {
    Global,
    Member,
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableDecl {
    pub ty: String,
    pub scope: VarScope,
    pub is_const: bool,
    pub is_constexpr: bool,
    pub is_static: bool,
}

impl VariableDecl {
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        self.is_const || self.is_constexpr
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasForm {
    Typedef,
    Using,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DeclKind {
    TranslationUnit,
    Namespace {
        body: Option<BraceInfo>,
    },
    Record(RecordDecl),
    Enum(EnumDecl),
    Function(Box<FunctionDecl>),
    Variable(VariableDecl),
    Macro {
        params: Option<Vec<String>>,
    },
    Alias {
        form: AliasForm,
        target: String,
    },
    UsingDirective,
    UsingDeclaration {
        target: String,
        inherits_constructor: bool,
    },
    Include {
        header: String,
        system: bool,
    },
    Unparsed,
}

/// One named construct in the declaration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclNode {
    pub id: NodeId,
    pub name: String,
    pub kind: DeclKind,
    pub visibility: Option<Visibility>,
    pub span: Span,
    pub name_pos: Position,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Comment block directly above the declaration
    pub leading_comment: Option<String>,
    /// Declared inside an `extern "C"` block or declaration
    pub extern_c: bool,
}

impl DeclNode {
    #[must_use]
    pub const fn category(&self) -> Category {
        match &self.kind {
            DeclKind::TranslationUnit => Category::TranslationUnit,
            DeclKind::Namespace { .. } => Category::Namespace,
            DeclKind::Record(record) => match record.key {
                RecordKey::Class => Category::Class,
                RecordKey::Struct => Category::Struct,
                RecordKey::Union => Category::Union,
            },
            DeclKind::Enum(decl) => {
                if decl.scoped {
                    Category::EnumClass
                } else {
                    Category::Enum
                }
            }
            DeclKind::Function(_) => Category::Function,
            DeclKind::Variable(_) => Category::Variable,
            DeclKind::Macro { .. } => Category::Macro,
            DeclKind::Alias { .. } => Category::Alias,
            DeclKind::UsingDirective => Category::UsingDirective,
            DeclKind::UsingDeclaration { .. } => Category::UsingDeclaration,
            DeclKind::Include { .. } => Category::Include,
            DeclKind::Unparsed => Category::Unparsed,
        }
    }

    #[must_use]
    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match &self.kind {
            DeclKind::Function(decl) => Some(decl),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_variable(&self) -> Option<&VariableDecl> {
        match &self.kind {
            DeclKind::Variable(decl) => Some(decl),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&RecordDecl> {
        match &self.kind {
            DeclKind::Record(decl) => Some(decl),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_enum(&self) -> Option<&EnumDecl> {
        match &self.kind {
            DeclKind::Enum(decl) => Some(decl),
            _ => None,
        }
    }
}

/// Arena of declaration nodes rooted at the translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxTree {
    nodes: Vec<DeclNode>,
}

impl SyntaxTree {
    #[must_use]
    pub fn new(span: Span) -> Self {
        Self {
            nodes: vec![DeclNode {
                id: NodeId::ROOT,
                name: String::new(),
                kind: DeclKind::TranslationUnit,
                visibility: None,
                span,
                name_pos: span.start,
                parent: None,
                children: Vec::new(),
                leading_comment: None,
                extern_c: false,
            }],
        }
    }

    #[must_use]
    pub fn root(&self) -> &DeclNode {
        &self.nodes[0]
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> &DeclNode {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut DeclNode {
        &mut self.nodes[id.0]
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<&DeclNode> {
        self.get(id).parent.map(|p| self.get(p))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &DeclNode> {
        self.get(id).children.iter().map(|c| self.get(*c))
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &DeclNode> {
        std::iter::successors(self.parent(id), |node| self.parent(node.id))
    }

    /// All nodes in creation order (parents before their children).
    pub fn iter(&self) -> impl Iterator<Item = &DeclNode> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Add `node` as the last child of `parent`, returning its id.
    pub(crate) fn push(&mut self, parent: NodeId, mut node: DeclNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.id = id;
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Names of every enum declared in this file.
    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, DeclKind::Enum(_)) && !n.name.is_empty())
            .map(|n| n.name.as_str())
    }
}
