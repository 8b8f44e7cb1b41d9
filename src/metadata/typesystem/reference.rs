use std::{fmt, fmt::Write as _, sync::Arc};

use crate::{
    metadata::{
        identity::AssemblyIdentity,
        typesystem::{ElementType, ELEMENT_TYPE},
    },
    Error, Result,
};

/// Shared handle to a node of the type reference graph
pub type TypeRefRc = Arc<TypeReference>;

/// The metadata scope a named type lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeScope {
    /// The module being built
    Module(String),
    /// Another module of the same assembly
    ModuleRef(String),
    /// A type defined, or forwarded, by another assembly
    AssemblyRef(AssemblyIdentity),
}

impl fmt::Display for TypeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeScope::Module(name) | TypeScope::ModuleRef(name) => write!(f, "{}", name),
            TypeScope::AssemblyRef(identity) => write!(f, "{}", identity.display_name()),
        }
    }
}

/// A type mentioned by name: a `TypeDef`, a `TypeRef` or a built-in type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    /// `TypeNamespace`, empty for nested types and the global type
    pub namespace: String,
    /// `TypeName`
    pub name: String,
    /// Where the type is defined. Nested types inherit the scope of their declaring type
    pub scope: Option<TypeScope>,
    /// The enclosing type of a nested type
    pub declaring_type: Option<TypeRefRc>,
    /// Set for the types signatures encode with a single byte
    pub primitive: Option<ElementType>,
    is_value_type: bool,
}

impl NamedType {
    /// Create a reference to a reference type named `namespace.name` in `scope`
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if `name` is empty.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        scope: Option<TypeScope>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Validation("type name cannot be empty".to_string()));
        }

        Ok(NamedType {
            namespace: namespace.into(),
            name,
            scope,
            declaring_type: None,
            primitive: None,
            is_value_type: false,
        })
    }

    /// Create a nested type of `declaring_type`
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if `name` is empty or `declaring_type` is not a named type.
    pub fn nested(declaring_type: TypeRefRc, name: impl Into<String>) -> Result<Self> {
        if !matches!(*declaring_type, TypeReference::Named(_)) {
            return Err(Error::Validation(format!(
                "'{}' cannot declare nested types",
                declaring_type.full_name()
            )));
        }

        let mut nested = NamedType::new("", name, None)?;
        nested.declaring_type = Some(declaring_type);
        Ok(nested)
    }

    /// Marks the type as a value type
    #[must_use]
    pub fn value_type(mut self) -> Self {
        self.is_value_type = true;
        self
    }

    /// The scope of the type, walking out of nested types
    #[must_use]
    pub fn scope(&self) -> Option<&TypeScope> {
        match (&self.scope, &self.declaring_type) {
            (Some(scope), _) => Some(scope),
            (None, Some(declaring)) => declaring.scope(),
            (None, None) => None,
        }
    }

    fn full_name(&self) -> String {
        match &self.declaring_type {
            Some(declaring) => format!("{}/{}", declaring.full_name(), self.name),
            None if self.namespace.is_empty() => self.name.clone(),
            None => format!("{}.{}", self.namespace, self.name),
        }
    }
}

/// Whether a generic parameter belongs to a type or a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericParameterOwner {
    /// `!n`, a parameter of the enclosing generic type
    Type,
    /// `!!n`, a parameter of the enclosing generic method
    Method,
}

/// A reference to a generic parameter by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParameter {
    /// Declared name, may be empty
    pub name: String,
    /// Zero based position in the owner's parameter list
    pub position: u16,
    /// Type or method parameter
    pub owner: GenericParameterOwner,
    /// The generic type declaring the parameter, or the declaring type of the generic method
    pub declaring_type: Option<TypeRefRc>,
}

impl GenericParameter {
    /// Create a parameter at `position` of a type or method
    pub fn new(name: impl Into<String>, position: u16, owner: GenericParameterOwner) -> Self {
        GenericParameter {
            name: name.into(),
            position,
            owner,
            declaring_type: None,
        }
    }

    fn name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }

        match self.owner {
            GenericParameterOwner::Type => format!("!{}", self.position),
            GenericParameterOwner::Method => format!("!!{}", self.position),
        }
    }
}

/// A single dimension of an array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArrayDimension {
    /// The lowest index of the dimension
    pub lower_bound: Option<i32>,
    /// The highest index of the dimension
    pub upper_bound: Option<i32>,
}

impl ArrayDimension {
    /// A dimension running from `lower_bound` to `upper_bound`, both inclusive
    #[must_use]
    pub fn bounded(lower_bound: i32, upper_bound: i32) -> Self {
        ArrayDimension {
            lower_bound: Some(lower_bound),
            upper_bound: Some(upper_bound),
        }
    }

    /// True if either bound is known
    #[must_use]
    pub fn is_sized(&self) -> bool {
        self.lower_bound.is_some() || self.upper_bound.is_some()
    }
}

impl fmt::Display for ArrayDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_sized() {
            return Ok(());
        }

        if let Some(lower) = self.lower_bound {
            write!(f, "{}", lower)?;
        }
        f.write_str("...")?;
        if let Some(upper) = self.upper_bound {
            write!(f, "{}", upper)?;
        }
        Ok(())
    }
}

/// Shape of an array type: one entry per dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayShape {
    dimensions: Vec<ArrayDimension>,
}

impl ArrayShape {
    /// A single dimensional, zero based array (`T[]`)
    #[must_use]
    pub fn vector() -> Self {
        ArrayShape {
            dimensions: vec![ArrayDimension::default()],
        }
    }

    /// An array of `rank` dimensions without bounds
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if `rank` is zero.
    pub fn with_rank(rank: usize) -> Result<Self> {
        Self::new(vec![ArrayDimension::default(); rank])
    }

    /// An array with explicit dimensions
    ///
    /// # Errors
    /// A signature stores sizes and lower bounds as two lists covering the leading
    /// dimensions, so only shapes of that form are accepted: every dimension with an upper
    /// bound also has a lower bound, and neither kind of bound follows a dimension without
    /// one.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if `dimensions` is empty, a dimension has an upper
    /// bound below its lower bound, or the bounds cannot be written to a signature.
    pub fn new(dimensions: Vec<ArrayDimension>) -> Result<Self> {
        if dimensions.is_empty() {
            return Err(Error::Validation(
                "array rank must be at least 1".to_string(),
            ));
        }

        let mut sized_run = true;
        let mut lower_run = true;
        for (index, dimension) in dimensions.iter().enumerate() {
            match (dimension.lower_bound, dimension.upper_bound) {
                (Some(lower), Some(upper)) if upper < lower => {
                    return Err(Error::Validation(format!(
                        "array dimension {} has an upper bound below its lower bound",
                        dimension
                    )));
                }
                (None, Some(_)) => {
                    return Err(Error::Validation(format!(
                        "array dimension {} ({}) has an upper bound but no lower bound",
                        index, dimension
                    )));
                }
                _ => {}
            }

            if (dimension.upper_bound.is_some() && !sized_run)
                || (dimension.lower_bound.is_some() && !lower_run)
            {
                return Err(Error::Validation(format!(
                    "array dimension {} ({}) is bounded but follows a dimension without that bound",
                    index, dimension
                )));
            }

            sized_run &= dimension.upper_bound.is_some();
            lower_run &= dimension.lower_bound.is_some();
        }

        Ok(ArrayShape { dimensions })
    }

    /// The number of dimensions
    #[must_use]
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// The dimensions, outermost first
    #[must_use]
    pub fn dimensions(&self) -> &[ArrayDimension] {
        &self.dimensions
    }

    /// True for `T[]`, the only array shape encoded as `SZARRAY`
    #[must_use]
    pub fn is_vector(&self) -> bool {
        self.dimensions.len() == 1 && !self.dimensions[0].is_sized()
    }
}

/// The transformation a [`TypeSpecification`] applies to its element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecificationKind {
    /// An array of the element type
    Array(ArrayShape),
    /// An unmanaged pointer, `T*`
    Pointer,
    /// A managed reference, `T&`
    ByRef,
    /// A pinned local
    Pinned,
    /// Start of the variable part of a vararg call site
    Sentinel,
    /// `T modreq(M)`
    RequiredModifier(TypeRefRc),
    /// `T modopt(M)`
    OptionalModifier(TypeRefRc),
    /// `T<A, B>`, the element type being the generic type definition
    GenericInstance(Vec<TypeRefRc>),
}

impl SpecificationKind {
    /// The signature byte introducing this kind
    #[must_use]
    pub fn element_code(&self) -> u8 {
        match self {
            SpecificationKind::Array(shape) if shape.is_vector() => ELEMENT_TYPE::SZARRAY,
            SpecificationKind::Array(_) => ELEMENT_TYPE::ARRAY,
            SpecificationKind::Pointer => ELEMENT_TYPE::PTR,
            SpecificationKind::ByRef => ELEMENT_TYPE::BYREF,
            SpecificationKind::Pinned => ELEMENT_TYPE::PINNED,
            SpecificationKind::Sentinel => ELEMENT_TYPE::SENTINEL,
            SpecificationKind::RequiredModifier(_) => ELEMENT_TYPE::CMOD_REQD,
            SpecificationKind::OptionalModifier(_) => ELEMENT_TYPE::CMOD_OPT,
            SpecificationKind::GenericInstance(_) => ELEMENT_TYPE::GENERICINST,
        }
    }

    fn name_suffix(&self) -> String {
        match self {
            SpecificationKind::Array(shape) if shape.is_vector() => "[]".to_string(),
            SpecificationKind::Array(shape) => {
                let dimensions: Vec<String> =
                    shape.dimensions().iter().map(ToString::to_string).collect();
                format!("[{}]", dimensions.join(","))
            }
            SpecificationKind::Pointer => "*".to_string(),
            SpecificationKind::ByRef => "&".to_string(),
            SpecificationKind::RequiredModifier(modifier) => {
                format!(" modreq({})", modifier.full_name())
            }
            SpecificationKind::OptionalModifier(modifier) => {
                format!(" modopt({})", modifier.full_name())
            }
            SpecificationKind::Pinned
            | SpecificationKind::Sentinel
            | SpecificationKind::GenericInstance(_) => String::new(),
        }
    }
}

/// A type built from exactly one element type by a structural transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpecification {
    kind: SpecificationKind,
    element_type: TypeRefRc,
}

impl TypeSpecification {
    /// Wrap `element_type` with `kind`
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if a generic instance has no arguments or its generic
    /// type is not a named type. Modifiers may be any type, `TypeSpec` modifiers included.
    pub fn new(kind: SpecificationKind, element_type: TypeRefRc) -> Result<Self> {
        if let SpecificationKind::GenericInstance(arguments) = &kind {
            if arguments.is_empty() {
                return Err(Error::Validation(format!(
                    "generic instance of '{}' needs at least one argument",
                    element_type.full_name()
                )));
            }
            if !matches!(*element_type, TypeReference::Named(_)) {
                return Err(Error::Validation(format!(
                    "'{}' is not a generic type definition",
                    element_type.full_name()
                )));
            }
        }

        Ok(TypeSpecification { kind, element_type })
    }

    /// The transformation
    #[must_use]
    pub fn kind(&self) -> &SpecificationKind {
        &self.kind
    }

    /// The wrapped type, one level down
    #[must_use]
    pub fn element_type(&self) -> &TypeRefRc {
        &self.element_type
    }
}

/// A node of the type reference graph.
///
/// # Examples
///
/// ```rust
/// use cilmeta::metadata::typesystem::{ElementType, TypeReference};
///
/// let int32 = TypeReference::primitive(ElementType::I4, None);
/// let pointer = TypeReference::pointer(TypeReference::by_ref(int32)?.into())?;
/// assert_eq!(pointer.name(), "Int32&*");
/// assert!(!pointer.is_value_type());
/// # Ok::<(), cilmeta::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeReference {
    /// A `TypeDef`, `TypeRef` or built-in type
    Named(NamedType),
    /// `!n` or `!!n`
    GenericParameter(GenericParameter),
    /// Pointer, array, modifier and the other composed types
    Specification(TypeSpecification),
}

impl TypeReference {
    /// A built-in type, `System.<name>` in the core library `corlib`
    #[must_use]
    pub fn primitive(element: ElementType, corlib: Option<AssemblyIdentity>) -> TypeRefRc {
        Arc::new(TypeReference::Named(NamedType {
            namespace: "System".to_string(),
            name: element.name().to_string(),
            scope: corlib.map(TypeScope::AssemblyRef),
            declaring_type: None,
            primitive: Some(element),
            is_value_type: element.is_value_type(),
        }))
    }

    /// Wrap `element_type` in a specification
    ///
    /// # Errors
    /// See [`TypeSpecification::new`].
    pub fn specification(kind: SpecificationKind, element_type: TypeRefRc) -> Result<Self> {
        Ok(TypeReference::Specification(TypeSpecification::new(
            kind,
            element_type,
        )?))
    }

    /// `T*`
    ///
    /// # Errors
    /// See [`TypeSpecification::new`].
    pub fn pointer(element_type: TypeRefRc) -> Result<Self> {
        Self::specification(SpecificationKind::Pointer, element_type)
    }

    /// `T&`
    ///
    /// # Errors
    /// See [`TypeSpecification::new`].
    pub fn by_ref(element_type: TypeRefRc) -> Result<Self> {
        Self::specification(SpecificationKind::ByRef, element_type)
    }

    /// `T[]`
    ///
    /// # Errors
    /// See [`TypeSpecification::new`].
    pub fn vector(element_type: TypeRefRc) -> Result<Self> {
        Self::specification(SpecificationKind::Array(ArrayShape::vector()), element_type)
    }

    /// `T modreq(M)`
    ///
    /// # Errors
    /// See [`TypeSpecification::new`].
    pub fn required_modifier(modifier: TypeRefRc, element_type: TypeRefRc) -> Result<Self> {
        Self::specification(SpecificationKind::RequiredModifier(modifier), element_type)
    }

    /// `T modopt(M)`
    ///
    /// # Errors
    /// See [`TypeSpecification::new`].
    pub fn optional_modifier(modifier: TypeRefRc, element_type: TypeRefRc) -> Result<Self> {
        Self::specification(SpecificationKind::OptionalModifier(modifier), element_type)
    }

    /// `T<A, B>`
    ///
    /// # Errors
    /// See [`TypeSpecification::new`].
    pub fn generic_instance(element_type: TypeRefRc, arguments: Vec<TypeRefRc>) -> Result<Self> {
        Self::specification(SpecificationKind::GenericInstance(arguments), element_type)
    }

    /// The simple name. Specifications append their suffix to the element's name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            TypeReference::Named(named) => named.name.clone(),
            TypeReference::GenericParameter(parameter) => parameter.name(),
            TypeReference::Specification(spec) => {
                let mut name = spec.element_type.name();
                name.push_str(&spec.kind.name_suffix());
                name
            }
        }
    }

    /// The namespace qualified name; nested types are separated by `/`
    #[must_use]
    pub fn full_name(&self) -> String {
        match self {
            TypeReference::Named(named) => named.full_name(),
            TypeReference::GenericParameter(parameter) => parameter.name(),
            TypeReference::Specification(spec) => {
                let mut name = spec.element_type.full_name();
                if let SpecificationKind::GenericInstance(arguments) = &spec.kind {
                    name.push('<');
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            name.push(',');
                        }
                        let _ = write!(name, "{}", argument.full_name());
                    }
                    name.push('>');
                } else {
                    name.push_str(&spec.kind.name_suffix());
                }
                name
            }
        }
    }

    /// The namespace, taken from the element type for specifications
    #[must_use]
    pub fn namespace(&self) -> &str {
        match self {
            TypeReference::Named(named) => &named.namespace,
            TypeReference::GenericParameter(_) => "",
            TypeReference::Specification(spec) => spec.element_type.namespace(),
        }
    }

    /// The scope the type resolves in
    #[must_use]
    pub fn scope(&self) -> Option<&TypeScope> {
        match self {
            TypeReference::Named(named) => named.scope(),
            TypeReference::GenericParameter(parameter) => parameter
                .declaring_type
                .as_ref()
                .and_then(|declaring| declaring.scope()),
            TypeReference::Specification(spec) => spec.element_type.scope(),
        }
    }

    /// The wrapped type of a specification, one level down
    #[must_use]
    pub fn element_type(&self) -> Option<&TypeRefRc> {
        match self {
            TypeReference::Specification(spec) => Some(&spec.element_type),
            _ => None,
        }
    }

    /// The innermost type that is not a specification
    #[must_use]
    pub fn get_element_type(&self) -> &TypeReference {
        let mut current = self;
        while let TypeReference::Specification(spec) = current {
            current = &spec.element_type;
        }
        current
    }

    /// True if a generic parameter occurs anywhere below this node
    #[must_use]
    pub fn contains_generic_parameter(&self) -> bool {
        match self {
            TypeReference::Named(named) => named
                .declaring_type
                .as_ref()
                .is_some_and(|declaring| declaring.contains_generic_parameter()),
            TypeReference::GenericParameter(_) => true,
            TypeReference::Specification(spec) => {
                spec.element_type.contains_generic_parameter()
                    || match &spec.kind {
                        SpecificationKind::RequiredModifier(modifier)
                        | SpecificationKind::OptionalModifier(modifier) => {
                            modifier.contains_generic_parameter()
                        }
                        SpecificationKind::GenericInstance(arguments) => arguments
                            .iter()
                            .any(|argument| argument.contains_generic_parameter()),
                        _ => false,
                    }
            }
        }
    }

    /// Value types are named types marked as such. Generic parameters and
    /// specifications never are
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        match self {
            TypeReference::Named(named) => named.is_value_type,
            TypeReference::GenericParameter(_) | TypeReference::Specification(_) => false,
        }
    }

    /// Change the value type flag of a named type
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] for generic parameters and specifications, whose
    /// flag is fixed.
    pub fn set_is_value_type(&mut self, value: bool) -> Result<()> {
        if let TypeReference::Named(named) = self {
            named.is_value_type = value;
            return Ok(());
        }

        Err(Error::InvalidOperation(format!(
            "the value type flag of '{}' cannot be changed",
            self.full_name()
        )))
    }

    /// The signature byte introducing this node
    #[must_use]
    pub fn metadata_type(&self) -> u8 {
        match self {
            TypeReference::Named(named) => match named.primitive {
                Some(element) => element.code(),
                None if named.is_value_type => ELEMENT_TYPE::VALUETYPE,
                None => ELEMENT_TYPE::CLASS,
            },
            TypeReference::GenericParameter(parameter) => match parameter.owner {
                GenericParameterOwner::Type => ELEMENT_TYPE::VAR,
                GenericParameterOwner::Method => ELEMENT_TYPE::MVAR,
            },
            TypeReference::Specification(spec) => spec.kind.element_code(),
        }
    }
}

impl From<NamedType> for TypeReference {
    fn from(named: NamedType) -> Self {
        TypeReference::Named(named)
    }
}

impl From<GenericParameter> for TypeReference {
    fn from(parameter: GenericParameter) -> Self {
        TypeReference::GenericParameter(parameter)
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
