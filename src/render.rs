//! Type-shape renderer: `TypeShape` → canonical, fully-qualified text.
//!
//! Pure and total. The shape model is closed, so this is one exhaustive
//! match; adding a shape variant is a compile error here until it gets a
//! rendering rule. Identical input always yields identical output, which is
//! what lets a caching host skip unchanged artifacts.

use crate::keywords;
use crate::model::{PrimitiveKind, TypeShape};

pub fn render(shape: &TypeShape) -> String {
    match shape {
        // Bare name, never qualified. Escaped so a keyword-named parameter
        // declared as `@T` stays `@T` at every use site.
        TypeShape::TypeParam(name) => keywords::escape(name).into_owned(),

        // Rank 1 → `T[]`; rank N → `T[,,…]` with N-1 separators. A jagged
        // array is a nested Array shape and renders `T[][]` instead.
        TypeShape::Array { element, rank } => {
            let inner = render(element);
            if *rank <= 1 {
                format!("{inner}[]")
            } else {
                format!("{inner}[{}]", ",".repeat(*rank as usize - 1))
            }
        }

        TypeShape::Tuple(elements) => {
            let body = elements
                .iter()
                .map(|el| match &el.name {
                    Some(name) => format!("{} {name}", render(&el.shape)),
                    None => render(&el.shape),
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("({body})")
        }

        TypeShape::Generic { namespace, name, args } => {
            let rendered_args = args.iter().map(render).collect::<Vec<_>>();
            // System.Nullable<T> is surface syntax, not a generic: `int?`.
            if shape.is_value_optional() {
                return format!("{}?", rendered_args[0]);
            }
            format!("global::{namespace}.{name}<{}>", rendered_args.join(", "))
        }

        TypeShape::Nullable(inner) => {
            let body = render(inner);
            // The value-optional wrapper already carries its own `?`.
            if inner.is_value_optional() {
                body
            } else {
                format!("{body}?")
            }
        }

        // Containment path runs self-first; reverse to outermost-first before
        // joining, then qualify with the namespace.
        TypeShape::Nested { path, namespace } => {
            let mut parts = path.clone();
            parts.reverse();
            let prefix = if namespace.is_empty() {
                "global".to_string()
            } else {
                format!("global::{namespace}")
            };
            format!("{prefix}.{}", parts.join("."))
        }

        TypeShape::Primitive(kind) => primitive_alias(*kind).to_string(),

        TypeShape::Named { namespace, name } => format!("global::{namespace}.{name}"),
    }
}

fn primitive_alias(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Bool => "bool",
        PrimitiveKind::Text => "string",
        PrimitiveKind::Int32 => "int",
        PrimitiveKind::Int64 => "long",
        PrimitiveKind::Float32 => "float",
        PrimitiveKind::Float64 => "double",
        PrimitiveKind::Void => "void",
        PrimitiveKind::Object => "object",
        PrimitiveKind::Uint64 => "ulong",
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TupleElement;

    fn prim(kind: PrimitiveKind) -> TypeShape {
        TypeShape::Primitive(kind)
    }

    #[test]
    fn primitives_use_alias_table() {
        assert_eq!(render(&prim(PrimitiveKind::Int32)), "int");
        assert_eq!(render(&prim(PrimitiveKind::Text)), "string");
        assert_eq!(render(&prim(PrimitiveKind::Void)), "void");
        assert_eq!(render(&prim(PrimitiveKind::Uint64)), "ulong");
        assert_eq!(render(&prim(PrimitiveKind::Int64)), "long");
    }

    #[test]
    fn named_fallback_is_globally_qualified() {
        let decimal = TypeShape::Named { namespace: "System".into(), name: "Decimal".into() };
        assert_eq!(render(&decimal), "global::System.Decimal");
    }

    #[test]
    fn rank_one_array() {
        let a = TypeShape::Array { element: Box::new(prim(PrimitiveKind::Int32)), rank: 1 };
        assert_eq!(render(&a), "int[]");
    }

    #[test]
    fn jagged_and_multirank_render_differently() {
        let jagged = TypeShape::Array {
            element: Box::new(TypeShape::Array {
                element: Box::new(prim(PrimitiveKind::Text)),
                rank: 1,
            }),
            rank: 1,
        };
        assert_eq!(render(&jagged), "string[][]");

        let rank2 = TypeShape::Array { element: Box::new(prim(PrimitiveKind::Text)), rank: 2 };
        assert_eq!(render(&rank2), "string[,]");

        let rank3 = TypeShape::Array { element: Box::new(prim(PrimitiveKind::Text)), rank: 3 };
        assert_eq!(render(&rank3), "string[,,]");
    }

    #[test]
    fn tuples_name_only_named_fields() {
        let t = TypeShape::Tuple(vec![
            TupleElement { name: Some("Name".into()), shape: prim(PrimitiveKind::Text) },
            TupleElement { name: Some("Age".into()), shape: prim(PrimitiveKind::Int32) },
        ]);
        assert_eq!(render(&t), "(string Name, int Age)");

        let mixed = TypeShape::Tuple(vec![
            TupleElement { name: None, shape: prim(PrimitiveKind::Bool) },
            TupleElement { name: Some("Score".into()), shape: prim(PrimitiveKind::Float64) },
        ]);
        assert_eq!(render(&mixed), "(bool, double Score)");
    }

    #[test]
    fn generic_instantiation_is_globally_qualified() {
        let list = TypeShape::Generic {
            namespace: "System.Collections.Generic".into(),
            name: "List".into(),
            args: vec![prim(PrimitiveKind::Text)],
        };
        assert_eq!(render(&list), "global::System.Collections.Generic.List<string>");

        let map = TypeShape::Generic {
            namespace: "System.Collections.Generic".into(),
            name: "Dictionary".into(),
            args: vec![prim(PrimitiveKind::Text), TypeShape::TypeParam("T".into())],
        };
        assert_eq!(render(&map), "global::System.Collections.Generic.Dictionary<string, T>");
    }

    #[test]
    fn value_optional_wrapper_renders_question_mark() {
        let opt_int = TypeShape::Generic {
            namespace: "System".into(),
            name: "Nullable".into(),
            args: vec![prim(PrimitiveKind::Int32)],
        };
        assert_eq!(render(&opt_int), "int?");
    }

    #[test]
    fn reference_nullable_appends_once() {
        let s = TypeShape::Nullable(Box::new(prim(PrimitiveKind::Text)));
        assert_eq!(render(&s), "string?");

        // Nullable annotation over Nullable<int> must not double the marker.
        let annotated_opt = TypeShape::Nullable(Box::new(TypeShape::Generic {
            namespace: "System".into(),
            name: "Nullable".into(),
            args: vec![prim(PrimitiveKind::Int32)],
        }));
        assert_eq!(render(&annotated_opt), "int?");
    }

    #[test]
    fn nullable_propagates_through_compound_shapes() {
        let arr = TypeShape::Nullable(Box::new(TypeShape::Array {
            element: Box::new(prim(PrimitiveKind::Text)),
            rank: 1,
        }));
        assert_eq!(render(&arr), "string[]?");
    }

    #[test]
    fn nested_types_qualify_outermost_first() {
        let nested = TypeShape::Nested {
            path: vec!["Inner".into(), "Outer".into()],
            namespace: "Example".into(),
        };
        assert_eq!(render(&nested), "global::Example.Outer.Inner");

        let global_ns = TypeShape::Nested {
            path: vec!["Inner".into(), "Outer".into()],
            namespace: String::new(),
        };
        assert_eq!(render(&global_ns), "global.Outer.Inner");
    }

    #[test]
    fn type_param_refs_stay_bare_but_escaped() {
        assert_eq!(render(&TypeShape::TypeParam("T".into())), "T");
        assert_eq!(render(&TypeShape::TypeParam("in".into())), "@in");
    }

    #[test]
    fn rendering_is_deterministic() {
        let shape = TypeShape::Generic {
            namespace: "System.Collections.Generic".into(),
            name: "Dictionary".into(),
            args: vec![
                prim(PrimitiveKind::Text),
                TypeShape::Nullable(Box::new(TypeShape::Array {
                    element: Box::new(prim(PrimitiveKind::Int32)),
                    rank: 2,
                })),
            ],
        };
        assert_eq!(render(&shape), render(&shape));
    }
}
