pub mod anchor;
pub mod cli;
pub mod constraints;
pub mod emit;
pub mod filter;
pub mod keywords;
pub mod model;
pub mod render;
pub mod select;
pub mod validate;

fn main() -> anyhow::Result<()> {
    let command_line_interface = cli::CommandLineInterface::load();
    command_line_interface.run()
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use serde_json::json;

    /// Host metadata for a realistic annotated class: property, parameterful
    /// and generic methods, a static helper, and a compiler-synthesized
    /// accessor that must all be handled.
    fn sample_metadata() -> serde_json::Value {
        json!({
            "name": "SampleService",
            "namespace": "Example.Services",
            "accessibility": "public",
            "members": [
                {
                    "name": "Property",
                    "is_public": true,
                    "kind": { "property": {
                        "shape": { "primitive": "text" },
                        "public_get": true,
                        "public_set": true
                    }}
                },
                {
                    "name": "get_Property",
                    "is_public": true,
                    "synthesized": true,
                    "kind": { "method": { "return_shape": { "primitive": "text" } } }
                },
                {
                    "name": "Method",
                    "is_public": true,
                    "kind": { "method": {
                        "return_shape": { "primitive": "void" },
                        "params": [
                            { "name": "parameter1", "shape": { "primitive": "text" } },
                            { "name": "parameter2", "shape": { "primitive": "int32" } }
                        ]
                    }}
                },
                {
                    "name": "MethodWithGenericAndReturnValue",
                    "is_public": true,
                    "kind": { "method": {
                        "return_shape": { "type_param": "T" },
                        "type_params": [{ "name": "T" }]
                    }}
                },
                {
                    "name": "Create",
                    "is_public": true,
                    "is_static": true,
                    "kind": { "method": { "return_shape": { "primitive": "void" } } }
                }
            ]
        })
    }

    #[test]
    fn full_pipeline_from_json_metadata() {
        let ty: crate::model::AnnotatedType =
            serde_json::from_value(sample_metadata()).unwrap();
        crate::validate::validate_type(&ty).unwrap();

        let contract = crate::emit::emit(&ty).unwrap();
        assert_eq!(contract.artifact_key, "ISampleService");
        assert_eq!(
            contract.text,
            "namespace Example.Services;\n\n\
             #nullable enable\n\
             public partial interface ISampleService\n\
             {\n    \
                 string Property { get; set; }\n    \
                 void Method(string parameter1, int parameter2);\n    \
                 T MethodWithGenericAndReturnValue<T>();\n\
             }\n"
        );
    }
}
