//! Bound objects: explicit method registration, no runtime reflection.

use std::collections::HashMap;

use serde_json::Value;

/// Declared shape of one method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    Bool,
    /// Integral JSON number. A float like `1.5` does not match.
    Int,
    /// Any JSON number.
    Float,
    Str,
    Object,
    Array,
    /// Accepts any JSON value, including null.
    Any,
}

impl ArgShape {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Bool => value.is_boolean(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::Str => value.is_string(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Any => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::Any => "any",
        }
    }
}

/// JSON type of a value, for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One declared parameter: a name (for by-name calls) and a shape.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    name: String,
    shape: ArgShape,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, shape: ArgShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> ArgShape {
        self.shape
    }
}

type MethodFn = Box<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// An invokable method: declared parameters plus the invoker closure.
pub struct MethodDescriptor {
    params: Vec<ParamSpec>,
    invoke: MethodFn,
}

impl MethodDescriptor {
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Call the invoker with already-decoded positional arguments.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, String> {
        (self.invoke)(args)
    }
}

/// A backend object whose methods are exposed for remote invocation.
pub struct BoundObject {
    name: String,
    methods: HashMap<String, MethodDescriptor>,
}

impl BoundObject {
    pub fn builder(name: impl Into<String>) -> BoundObjectBuilder {
        BoundObjectBuilder {
            name: name.into(),
            methods: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.get(name)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

/// Builds a [`BoundObject`]. Registration happens here, once, at setup;
/// the built object exposes no mutation API.
pub struct BoundObjectBuilder {
    name: String,
    methods: HashMap<String, MethodDescriptor>,
}

impl BoundObjectBuilder {
    /// Register a method. Closure state the method mutates is the
    /// object's own concern to serialize.
    pub fn method<F>(mut self, name: impl Into<String>, params: Vec<ParamSpec>, invoke: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        let name = name.into();
        let descriptor = MethodDescriptor {
            params,
            invoke: Box::new(invoke),
        };
        if self.methods.insert(name.clone(), descriptor).is_some() {
            tracing::warn!(object = %self.name, method = %name, "method replaced by a later registration");
        }
        self
    }

    pub fn build(self) -> BoundObject {
        BoundObject {
            name: self.name,
            methods: self.methods,
        }
    }
}

/// The table of all bound objects, keyed by exposed name.
///
/// Assembled before the host begins serving requests and handed to the
/// bridge by value; nothing can be added or removed afterwards.
#[derive(Default)]
pub struct BoundObjectTable {
    objects: HashMap<String, BoundObject>,
}

impl BoundObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, object: BoundObject) {
        let name = object.name().to_string();
        if self.objects.insert(name.clone(), object).is_some() {
            tracing::warn!(object = %name, "bound object replaced by a later registration");
        }
    }

    pub fn get(&self, name: &str) -> Option<&BoundObject> {
        self.objects.get(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn int_shape_rejects_non_integers() {
        assert!(ArgShape::Int.matches(&json!(5)));
        assert!(ArgShape::Int.matches(&json!(-3)));
        assert!(!ArgShape::Int.matches(&json!(1.5)));
        assert!(!ArgShape::Int.matches(&json!("5")));
        assert!(!ArgShape::Int.matches(&json!(null)));
    }

    #[test]
    fn float_shape_accepts_any_number() {
        assert!(ArgShape::Float.matches(&json!(1.5)));
        assert!(ArgShape::Float.matches(&json!(5)));
        assert!(!ArgShape::Float.matches(&json!("1.5")));
    }

    #[test]
    fn any_shape_accepts_everything() {
        assert!(ArgShape::Any.matches(&json!(null)));
        assert!(ArgShape::Any.matches(&json!({"nested": []})));
    }

    #[test]
    fn remaining_shapes_match_their_types() {
        assert!(ArgShape::Bool.matches(&json!(true)));
        assert!(ArgShape::Str.matches(&json!("hi")));
        assert!(ArgShape::Object.matches(&json!({})));
        assert!(ArgShape::Array.matches(&json!([])));
        assert!(!ArgShape::Bool.matches(&json!(0)));
        assert!(!ArgShape::Object.matches(&json!([])));
    }

    #[test]
    fn builder_registers_methods() {
        let object = BoundObject::builder("math")
            .method("zero", vec![], |_| Ok(json!(0)))
            .method(
                "double",
                vec![ParamSpec::new("n", ArgShape::Int)],
                |args| Ok(json!(args[0].as_i64().unwrap_or(0) * 2)),
            )
            .build();

        assert_eq!(object.name(), "math");
        assert!(object.method("zero").is_some());
        assert!(object.method("double").is_some());
        assert!(object.method("triple").is_none());

        let mut names: Vec<&str> = object.method_names().collect();
        names.sort();
        assert_eq!(names, vec!["double", "zero"]);
    }

    #[test]
    fn duplicate_method_registration_replaces() {
        let object = BoundObject::builder("o")
            .method("m", vec![], |_| Ok(json!("first")))
            .method("m", vec![], |_| Ok(json!("second")))
            .build();
        assert_eq!(object.method("m").unwrap().invoke(&[]).unwrap(), json!("second"));
    }

    #[test]
    fn table_lookup_by_name() {
        let mut table = BoundObjectTable::new();
        table.bind(BoundObject::builder("counter").build());
        table.bind(BoundObject::builder("greeter").build());

        assert_eq!(table.len(), 2);
        assert!(table.get("counter").is_some());
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn descriptor_exposes_declared_params() {
        let object = BoundObject::builder("o")
            .method(
                "m",
                vec![
                    ParamSpec::new("a", ArgShape::Int),
                    ParamSpec::new("b", ArgShape::Str),
                ],
                |_| Ok(Value::Null),
            )
            .build();
        let descriptor = object.method("m").unwrap();
        assert_eq!(descriptor.params().len(), 2);
        assert_eq!(descriptor.params()[0].name(), "a");
        assert_eq!(descriptor.params()[1].shape(), ArgShape::Str);
    }
}
