//! C# trait generation using genco

use crate::error::{Error, Result};
use crate::model::{ClassDescriptor, FieldDescriptor, MethodDescriptor, Statement};
use crate::util::{escape_csharp, single_line};
use genco::prelude::*;

use super::Provenance;

/// Render a logic class and its paired Info class as one C# file
pub fn render(logic: &ClassDescriptor, provenance: Option<&Provenance>) -> Result<String> {
    let tokens = CSharpRenderer.render(logic, provenance);
    tokens
        .to_file_string()
        .map_err(|e| Error::Render(format!("C# formatting failed: {}", e)))
}

struct CSharpRenderer;

impl CSharpRenderer {
    fn render(&self, logic: &ClassDescriptor, provenance: Option<&Provenance>) -> csharp::Tokens {
        let classes: Vec<&ClassDescriptor> = logic
            .paired_config
            .as_deref()
            .into_iter()
            .chain(std::iter::once(logic))
            .collect();

        let header: Vec<String> = provenance
            .map(|p| {
                vec![
                    format!(
                        "// GENERATED FROM behavior tree '{}'",
                        single_line(&p.source_id)
                    ),
                    format!("// TREE HASH: {}", p.source_hash),
                    "// DO NOT EDIT - regenerate from tree".to_string(),
                ]
            })
            .unwrap_or_default();

        let mut usings: Vec<&str> = Vec::new();
        for using in classes.iter().flat_map(|c| c.usings.iter()) {
            if !usings.contains(&using.as_str()) {
                usings.push(using);
            }
        }

        quote! {
            $(if !header.is_empty() {
                $(for line in &header join ($['\r']) => $line)
                $['\n']
            })
            $(for using in &usings join ($['\r']) => using $(*using);)
            $['\n']
            namespace $(&logic.namespace)
            {
                $(for class in &classes join ($['\n']) => $(self.render_class(class)))
            }
        }
    }

    fn render_class(&self, class: &ClassDescriptor) -> csharp::Tokens {
        let bases = std::iter::once(class.base_type.as_str())
            .chain(class.implemented_capabilities.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ");
        let separated = !class.fields.is_empty() && !class.methods.is_empty();

        quote! {
            public class $(&class.name) : $bases
            {
                $(for field in &class.fields join ($['\r']) => $(self.render_field(field)))
                $(if separated {
                    $['\n']
                })
                $(for method in &class.methods join ($['\n']) => $(self.render_method(method)))
            }
        }
    }

    fn render_field(&self, field: &FieldDescriptor) -> csharp::Tokens {
        let desc = (field.exposed_to_config && !field.description.is_empty())
            .then(|| format!("\"{}\"", escape_csharp(&field.description)));

        let mut modifiers = String::new();
        if !field.access.is_empty() {
            modifiers.push_str(&field.access);
            modifiers.push(' ');
        }
        if field.readonly {
            modifiers.push_str("readonly ");
        }
        let initializer = field
            .default_value
            .as_deref()
            .map(|value| format!(" = {}", self.render_default(&field.typ, value)))
            .unwrap_or_default();

        quote! {
            $(for d in &desc => [Desc($d)]$['\r'])
            $modifiers$(&field.typ) $(&field.name)$initializer;
        }
    }

    fn render_default(&self, typ: &str, value: &str) -> String {
        match typ {
            "string" => format!("\"{}\"", escape_csharp(value)),
            _ => value.to_string(),
        }
    }

    fn render_method(&self, method: &MethodDescriptor) -> csharp::Tokens {
        quote! {
            $(self.signature(method))
            $(self.render_initializer(method))
            {
                $(self.render_body(&method.body))
            }
        }
    }

    /// Constructor chaining sits one level under the signature
    fn render_initializer(&self, method: &MethodDescriptor) -> csharp::Tokens {
        let mut tokens = csharp::Tokens::new();
        if let Some(initializer) = &method.base_initializer {
            tokens.indent();
            tokens.append(format!(": {}", initializer));
            tokens.unindent();
        }
        tokens
    }

    fn signature(&self, method: &MethodDescriptor) -> String {
        let params = method
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.typ, p.name))
            .collect::<Vec<_>>()
            .join(", ");

        // Explicit interface implementations take no modifiers.
        if let (Some(capability), Some(ret)) =
            (&method.explicit_capability_binding, &method.return_type)
        {
            return format!("{} {}.{}({})", ret, capability, method.name, params);
        }

        let mut signature = String::new();
        if !method.access.is_empty() {
            signature.push_str(&method.access);
            signature.push(' ');
        }
        if method.is_override {
            signature.push_str("override ");
        }
        if let Some(ret) = &method.return_type {
            signature.push_str(ret);
            signature.push(' ');
        }
        signature.push_str(&format!("{}({})", method.name, params));
        signature
    }

    /// Statement depth is relative to the method body
    fn render_body(&self, body: &[Statement]) -> csharp::Tokens {
        let mut tokens = csharp::Tokens::new();
        let mut level = 0;
        for statement in body {
            while level < statement.depth {
                tokens.indent();
                level += 1;
            }
            while level > statement.depth {
                tokens.unindent();
                level -= 1;
            }
            tokens.append(statement.text.as_str());
            tokens.push();
        }
        while level > 0 {
            tokens.unindent();
            level -= 1;
        }
        tokens
    }
}
