//! Core contract data structures.

use super::{QualifiedName, SourcePosition, SymbolKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Current contract document schema version.
pub const SCHEMA_VERSION: u32 = 1;

const fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// The canonical structural model of a package's declared surface.
///
/// Built once by [`ContractBuilder`] (or decoded from a document) and only
/// read afterwards. Entity vectors are kept in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Document schema version
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Root package identity (module path or package name)
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub functions: Vec<Function>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub constants: Vec<Constant>,
}

impl Contract {
    /// Create an empty contract for a package.
    pub fn empty(package: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            package: package.into(),
            interfaces: Vec::new(),
            types: Vec::new(),
            functions: Vec::new(),
            variables: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Total number of top-level symbols.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.interfaces.len()
            + self.types.len()
            + self.functions.len()
            + self.variables.len()
            + self.constants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbol_count() == 0
    }

    /// Sort every entity list into canonical order.
    ///
    /// Parameter and result lists are positional and keep their order.
    pub(crate) fn canonicalize(&mut self) {
        self.interfaces.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        for iface in &mut self.interfaces {
            iface.methods.sort_by(|a, b| a.name.cmp(&b.name));
            iface.embeds.sort();
            iface.embeds.dedup();
        }
        self.types.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        for ty in &mut self.types {
            ty.fields.sort_by(|a, b| a.name.cmp(&b.name));
        }
        self.functions.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        self.variables.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        self.constants.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    }
}

fn sort_key<T: Declared>(item: &T) -> (&str, &str) {
    (item.package(), item.name())
}

/// Common accessors for top-level declarations.
pub trait Declared {
    /// Kind reported for the symbol itself
    const KIND: SymbolKind;

    fn name(&self) -> &str;
    fn package(&self) -> &str;
    fn doc(&self) -> &str;
    fn position(&self) -> Option<&SourcePosition>;

    fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(self.package(), self.name())
    }
}

macro_rules! impl_declared {
    ($ty:ty, $kind:expr) => {
        impl Declared for $ty {
            const KIND: SymbolKind = $kind;

            fn name(&self) -> &str {
                &self.name
            }

            fn package(&self) -> &str {
                &self.package
            }

            fn doc(&self) -> &str {
                &self.doc
            }

            fn position(&self) -> Option<&SourcePosition> {
                self.position.as_ref()
            }
        }
    };
}

/// A positional parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Type signature text
    #[serde(rename = "type", default)]
    pub ty: String,
}

impl Parameter {
    pub fn named(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ty: ty.into(),
        }
    }

    pub fn unnamed(ty: impl Into<String>) -> Self {
        Self {
            name: None,
            ty: ty.into(),
        }
    }

    fn render(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} {}", self.ty),
            None => self.ty.clone(),
        }
    }
}

/// Render `(a int, b string) (bool, error)` style signatures.
#[must_use]
pub fn render_signature(params: &[Parameter], results: &[Parameter]) -> String {
    let params = params.iter().map(Parameter::render).collect::<Vec<_>>().join(", ");
    let mut out = format!("({params})");
    match results {
        [] => {}
        [single] if single.name.is_none() => {
            out.push(' ');
            out.push_str(&single.ty);
        }
        _ => {
            let results = results.iter().map(Parameter::render).collect::<Vec<_>>().join(", ");
            out.push_str(&format!(" ({results})"));
        }
    }
    out
}

/// Render a generic parameter list, e.g. `[K comparable, V any]`.
#[must_use]
pub fn render_type_params(params: &[Parameter]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let inner = params.iter().map(Parameter::render).collect::<Vec<_>>().join(", ");
    format!("[{inner}]")
}

/// An interface and its method set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    /// Generic parameters with their constraints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<Parameter>,
    #[serde(default)]
    pub methods: Vec<Method>,
    /// Embedded interfaces and type-set elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePosition>,
}

impl_declared!(Interface, SymbolKind::Interface);

/// A method declared in an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default)]
    pub results: Vec<Parameter>,
}

impl Method {
    /// Signature text, e.g. `Login(user string) (bool, error)`.
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}{}", self.name, render_signature(&self.params, &self.results))
    }
}

/// Kind of a named type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Struct,
    /// Any non-struct named type (defined type or `=` alias)
    Alias,
}

impl TypeKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Alias => "alias",
        }
    }
}

/// A named type: a struct with fields or an alias of another type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<Parameter>,
    /// Struct fields (empty for aliases)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    /// Underlying type text for aliases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePosition>,
}

impl_declared!(TypeDecl, SymbolKind::Type);

impl TypeDecl {
    /// An empty struct type.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind: TypeKind::Struct,
            doc: String::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            underlying: None,
            position: None,
        }
    }
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
    /// Serialization tag content without delimiters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub embedded: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            tag: None,
            doc: String::new(),
            embedded: false,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A package-level function, or a method declared on a named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// `Name`, or `Recv.Name` for methods
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    /// Receiver type text for methods, e.g. `*User`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<Parameter>,
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default)]
    pub results: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePosition>,
}

impl_declared!(Function, SymbolKind::Function);

impl Function {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            doc: String::new(),
            receiver: None,
            type_params: Vec::new(),
            params: Vec::new(),
            results: Vec::new(),
            position: None,
        }
    }

    /// Signature text, e.g. `func (*User) Validate() error`.
    #[must_use]
    pub fn signature(&self) -> String {
        let short_name = self.name.rsplit('.').next().unwrap_or(&self.name);
        let receiver = self
            .receiver
            .as_ref()
            .map(|r| format!("({r}) "))
            .unwrap_or_default();
        format!(
            "func {receiver}{short_name}{}{}",
            render_type_params(&self.type_params),
            render_signature(&self.params, &self.results)
        )
    }
}

/// A package-level variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePosition>,
}

impl_declared!(Variable, SymbolKind::Variable);

/// A package-level constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub package: String,
    /// Declared type; `None` for untyped constants
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePosition>,
}

impl_declared!(Constant, SymbolKind::Constant);

/// Render a value declaration as `Name Type = Value`.
pub fn render_value(name: &str, ty: Option<&str>, value: Option<&str>) -> String {
    let mut out = name.to_string();
    if let Some(ty) = ty {
        out.push(' ');
        out.push_str(ty);
    }
    if let Some(value) = value {
        out.push_str(" = ");
        out.push_str(value);
    }
    out
}

/// Accumulates declarations keyed by qualified name, then freezes them into
/// a canonical [`Contract`].
///
/// The first declaration of a qualified name wins; later ones are counted as
/// collisions.
#[derive(Debug, Default)]
pub struct ContractBuilder {
    package: String,
    interfaces: IndexMap<QualifiedName, Interface>,
    types: IndexMap<QualifiedName, TypeDecl>,
    functions: IndexMap<QualifiedName, Function>,
    variables: IndexMap<QualifiedName, Variable>,
    constants: IndexMap<QualifiedName, Constant>,
    collision_count: usize,
}

impl ContractBuilder {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Number of declarations dropped because their name was already taken.
    #[must_use]
    pub const fn collision_count(&self) -> usize {
        self.collision_count
    }

    /// Add an interface. Returns `true` if the name collided.
    pub fn add_interface(&mut self, item: Interface) -> bool {
        insert_first(&mut self.interfaces, item, &mut self.collision_count)
    }

    /// Add a named type. Returns `true` if the name collided.
    pub fn add_type(&mut self, item: TypeDecl) -> bool {
        insert_first(&mut self.types, item, &mut self.collision_count)
    }

    /// Add a function. Returns `true` if the name collided.
    pub fn add_function(&mut self, item: Function) -> bool {
        insert_first(&mut self.functions, item, &mut self.collision_count)
    }

    /// Add a variable. Returns `true` if the name collided.
    pub fn add_variable(&mut self, item: Variable) -> bool {
        insert_first(&mut self.variables, item, &mut self.collision_count)
    }

    /// Add a constant. Returns `true` if the name collided.
    pub fn add_constant(&mut self, item: Constant) -> bool {
        insert_first(&mut self.constants, item, &mut self.collision_count)
    }

    /// Freeze into a canonical contract.
    #[must_use]
    pub fn build(self) -> Contract {
        let mut contract = Contract {
            schema_version: SCHEMA_VERSION,
            package: self.package,
            interfaces: self.interfaces.into_values().collect(),
            types: self.types.into_values().collect(),
            functions: self.functions.into_values().collect(),
            variables: self.variables.into_values().collect(),
            constants: self.constants.into_values().collect(),
        };
        contract.canonicalize();
        contract
    }
}

fn insert_first<T: Declared>(
    map: &mut IndexMap<QualifiedName, T>,
    item: T,
    collisions: &mut usize,
) -> bool {
    let key = item.qualified_name();
    if map.contains_key(&key) {
        tracing::debug!(symbol = %key, "duplicate declaration ignored");
        *collisions += 1;
        true
    } else {
        map.insert(key, item);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(package: &str, name: &str, value: &str) -> Constant {
        Constant {
            name: name.to_string(),
            package: package.to_string(),
            ty: None,
            value: Some(value.to_string()),
            doc: String::new(),
            position: None,
        }
    }

    #[test]
    fn test_render_signature() {
        let params = vec![
            Parameter::named("username", "string"),
            Parameter::named("password", "string"),
        ];
        let results = vec![Parameter::unnamed("bool"), Parameter::unnamed("error")];
        assert_eq!(
            render_signature(&params, &results),
            "(username string, password string) (bool, error)"
        );
        assert_eq!(render_signature(&[], &[Parameter::unnamed("error")]), "() error");
        assert_eq!(
            render_signature(&[], &[Parameter::named("err", "error")]),
            "() (err error)"
        );
    }

    #[test]
    fn test_function_signature_with_receiver() {
        let mut func = Function::new("users", "User.Validate");
        func.receiver = Some("*User".to_string());
        func.results = vec![Parameter::unnamed("error")];
        assert_eq!(func.signature(), "func (*User) Validate() error");
    }

    #[test]
    fn test_builder_keeps_first_declaration() {
        let mut builder = ContractBuilder::new("pkg");
        assert!(!builder.add_constant(constant("pkg", "A", "1")));
        assert!(builder.add_constant(constant("pkg", "A", "2")));
        assert_eq!(builder.collision_count(), 1);

        let contract = builder.build();
        assert_eq!(contract.constants.len(), 1);
        assert_eq!(contract.constants[0].value.as_deref(), Some("1"));
    }

    #[test]
    fn test_builder_sorts_canonically() {
        let mut builder = ContractBuilder::new("pkg");
        builder.add_constant(constant("pkg/b", "A", "1"));
        builder.add_constant(constant("pkg", "Z", "1"));
        builder.add_constant(constant("pkg", "B", "1"));

        let contract = builder.build();
        let names: Vec<_> = contract
            .constants
            .iter()
            .map(|c| format!("{}:{}", c.package, c.name))
            .collect();
        assert_eq!(names, vec!["pkg:B", "pkg:Z", "pkg/b:A"]);
    }

    #[test]
    fn test_empty_contract() {
        let contract = Contract::empty("pkg");
        assert!(contract.is_empty());
        assert_eq!(contract.schema_version, SCHEMA_VERSION);
    }
}
