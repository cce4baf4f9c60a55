//! Class model: structured form of the generated C# trait
//!
//! The synthesizer builds these descriptors and the C# emitter renders them.
//! A trait is a pair: the logic class holds the behavior and owns its paired
//! configuration ("Info") class.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Namespace generated traits live in unless configured otherwise
pub const DEFAULT_NAMESPACE: &str = "OpenRA.Mods.Common.Traits";

/// Imports every generated trait file starts with
pub const DEFAULT_USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.Linq",
    "OpenRA.Activities",
    "OpenRA.Mods.Common.Activities",
    "OpenRA.Traits",
];

/// A class declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassDescriptor {
    pub name: String,

    /// Target namespace
    pub namespace: String,

    /// Ordered `using` imports
    pub usings: Vec<String>,

    /// Base class (e.g. "ConditionalTrait<FleeInfo>")
    pub base_type: String,

    /// Engine interfaces implemented (e.g. "ITick")
    pub implemented_capabilities: Vec<String>,

    /// Fields in declaration order, names unique
    pub fields: Vec<FieldDescriptor>,

    /// Methods in declaration order
    pub methods: Vec<MethodDescriptor>,

    /// Configuration half of a logic/config pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_config: Option<Box<ClassDescriptor>>,

    /// Engine traits the actor must carry for this class to work
    #[serde(default)]
    pub required_runtime_dependencies: BTreeSet<String>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>, base_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            usings: DEFAULT_USINGS.iter().map(|u| u.to_string()).collect(),
            base_type: base_type.into(),
            implemented_capabilities: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            paired_config: None,
            required_runtime_dependencies: BTreeSet::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Fields that must show up in the actor document
    pub fn exposed_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.exposed_to_config)
    }

    pub fn add_capability(&mut self, capability: impl Into<String>) {
        let capability = capability.into();
        if !self.implemented_capabilities.contains(&capability) {
            self.implemented_capabilities.push(capability);
        }
    }
}

/// A field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDescriptor {
    /// Sanitized identifier
    pub name: String,

    /// C# type (e.g. "int", "bool", "BooleanExpression")
    #[serde(rename = "type")]
    pub typ: String,

    /// Default value as written in the actor document (unquoted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Whether the field appears in the actor document
    pub exposed_to_config: bool,

    pub description: String,

    /// Access modifier
    pub access: String,

    pub readonly: bool,
}

impl FieldDescriptor {
    /// A public readonly field loaded from the actor document
    pub fn exposed(
        name: impl Into<String>,
        typ: impl Into<String>,
        default_value: Option<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
            default_value,
            exposed_to_config: true,
            description: description.into(),
            access: "public".into(),
            readonly: true,
        }
    }

    /// Mutable private state on the logic class
    pub fn private_state(name: impl Into<String>, typ: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
            default_value: None,
            exposed_to_config: false,
            description: String::new(),
            access: String::new(),
            readonly: false,
        }
    }

    /// Document value, falling back to the type's zero value
    pub fn document_value(&self) -> String {
        if let Some(value) = &self.default_value {
            return value.clone();
        }
        match self.typ.as_str() {
            "bool" => "false".into(),
            "int" | "long" | "short" | "float" | "double" | "decimal" => "0".into(),
            _ => String::new(),
        }
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub typ: String,
    pub name: String,
}

impl Parameter {
    pub fn new(typ: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            typ: typ.into(),
            name: name.into(),
        }
    }
}

/// One emitted line of a method body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Statement {
    /// Nesting depth relative to the method body
    pub depth: usize,
    pub text: String,
}

impl Statement {
    pub fn new(depth: usize, text: impl Into<String>) -> Self {
        Self {
            depth,
            text: text.into(),
        }
    }
}

/// A method or constructor declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MethodDescriptor {
    pub name: String,

    /// `None` for constructors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,

    pub parameters: Vec<Parameter>,

    pub body: Vec<Statement>,

    /// Interface whose hook this method implements explicitly (e.g. "ITick")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_capability_binding: Option<String>,

    pub access: String,

    pub is_override: bool,

    /// Constructor chaining call (e.g. "base(info)")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_initializer: Option<String>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: Some(return_type.into()),
            parameters: Vec::new(),
            body: Vec::new(),
            explicit_capability_binding: None,
            access: "public".into(),
            is_override: false,
            base_initializer: None,
        }
    }

    pub fn constructor(class_name: impl Into<String>) -> Self {
        Self {
            return_type: None,
            ..Self::new(class_name, String::new())
        }
    }

    pub fn with_param(mut self, typ: impl Into<String>, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(typ, name));
        self
    }

    pub fn bound_to(mut self, capability: impl Into<String>) -> Self {
        self.explicit_capability_binding = Some(capability.into());
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn push(&mut self, depth: usize, text: impl Into<String>) {
        self.body.push(Statement::new(depth, text));
    }
}
