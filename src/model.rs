// Strongly-typed model of host-supplied type metadata. No serde_json::Value
// past this boundary: inputs deserialize straight into these shapes.

use serde::Deserialize;

// ————————————————————————————————————————————————————————————————————————————
// TYPE SHAPES
// ————————————————————————————————————————————————————————————————————————————

/// Structural description of a resolved type, independent of where it came
/// from. This is a closed model: the host resolves everything to one of these
/// variants before the engine ever sees it, so rendering can match
/// exhaustively instead of probing an open symbol graph.
///
/// Invariants (checked by `validate`, assumed elsewhere):
/// - `Nullable` never wraps another `Nullable`
/// - `Array.rank >= 1`
/// - `Tuple` has at least two elements
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    Primitive(PrimitiveKind),
    /// Fallback for any non-special named type.
    Named { namespace: String, name: String },
    /// Reference to a generic type parameter; renders as its bare name.
    TypeParam(String),
    Array { element: Box<TypeShape>, #[serde(default = "rank_one")] rank: u32 },
    Tuple(Vec<TupleElement>),
    Generic { namespace: String, name: String, args: Vec<TypeShape> },
    /// Reference-type nullability annotation (`T?`).
    Nullable(Box<TypeShape>),
    /// Type nested inside other types. `path` runs from the type itself
    /// outward to its outermost container.
    Nested { path: Vec<String>, namespace: String },
}

fn rank_one() -> u32 { 1 }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Bool,
    Text,
    Int32,
    Int64,
    Float32,
    Float64,
    Void,
    Object,
    Uint64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TupleElement {
    #[serde(default)]
    pub name: Option<String>,
    pub shape: TypeShape,
}

impl TypeShape {
    /// The built-in optional-value wrapper (`System.Nullable<T>`), which
    /// renders as `T?` rather than in generic form.
    pub fn is_value_optional(&self) -> bool {
        matches!(
            self,
            TypeShape::Generic { namespace, name, args }
                if namespace == "System" && name == "Nullable" && args.len() == 1
        )
    }
}

// ————————————————————————————————————————————————————————————————————————————
// MEMBERS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub name: String,
    /// Per-member "leave me out of the contract" marker.
    #[serde(default)]
    pub excluded: bool,
    /// Compiler-synthesized members (accessor methods, implicit ctors).
    #[serde(default)]
    pub synthesized: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_public: bool,
    pub kind: MemberKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Property {
        shape: TypeShape,
        #[serde(default)]
        public_get: bool,
        #[serde(default)]
        public_set: bool,
    },
    Method {
        return_shape: TypeShape,
        #[serde(default)]
        type_params: Vec<TypeParam>,
        #[serde(default)]
        params: Vec<Param>,
    },
    // Present in host metadata but never rendered; the selector skips them.
    Event,
    Indexer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Param {
    pub name: String,
    pub shape: TypeShape,
    #[serde(default)]
    pub passing: PassingMode,
    /// Literal default-value text, verbatim from the source declaration.
    #[serde(default)]
    pub default_value: Option<String>,
    /// `MaybeNullWhen(b)` nullability hint on the parameter.
    #[serde(default)]
    pub maybe_null_when: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassingMode {
    #[default]
    Value,
    Ref,
    Out,
    In,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeParam {
    pub name: String,
    #[serde(default)]
    pub constraints: ConstraintSet,
}

/// Constraints on one generic parameter. `reference_type`/`value_type` are
/// mutually exclusive in well-formed metadata (not re-validated; the host's
/// type system already enforced it).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConstraintSet {
    #[serde(default)]
    pub reference_type: bool,
    #[serde(default)]
    pub value_type: bool,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub unmanaged: bool,
    /// Named constraint types, in declared order.
    #[serde(default)]
    pub types: Vec<TypeShape>,
    #[serde(default)]
    pub constructor_required: bool,
}

impl ConstraintSet {
    pub fn is_empty(&self) -> bool {
        !self.reference_type
            && !self.value_type
            && !self.not_null
            && !self.unmanaged
            && !self.constructor_required
            && self.types.is_empty()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ANNOTATED TYPES & ARTIFACTS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

/// One marker-annotated type as the host resolved it: identity, marker
/// arguments, members in declaration order, and the ancestor chain from
/// immediate base to root.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotatedType {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Optional anchor-type name from the marker; gates synthesis.
    #[serde(default)]
    pub anchor: Option<String>,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub ancestor_chain: Vec<String>,
}

/// Final output: one named text artifact per qualifying type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedContract {
    pub artifact_key: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_deserialize_from_tagged_json() {
        let src = r#"{ "array": { "element": { "primitive": "int32" } } }"#;
        let shape: TypeShape = serde_json::from_str(src).unwrap();
        assert_eq!(
            shape,
            TypeShape::Array {
                element: Box::new(TypeShape::Primitive(PrimitiveKind::Int32)),
                rank: 1,
            }
        );
    }

    #[test]
    fn value_optional_detection_requires_system_nullable_arity_one() {
        let yes = TypeShape::Generic {
            namespace: "System".into(),
            name: "Nullable".into(),
            args: vec![TypeShape::Primitive(PrimitiveKind::Int32)],
        };
        assert!(yes.is_value_optional());

        let wrong_ns = TypeShape::Generic {
            namespace: "Other".into(),
            name: "Nullable".into(),
            args: vec![TypeShape::Primitive(PrimitiveKind::Int32)],
        };
        assert!(!wrong_ns.is_value_optional());
    }

    #[test]
    fn member_defaults_are_conservative() {
        let src = r#"{
            "name": "Count",
            "kind": { "property": { "shape": { "primitive": "int32" }, "public_get": true } }
        }"#;
        let m: Member = serde_json::from_str(src).unwrap();
        assert!(!m.is_public);
        assert!(!m.is_static);
        assert!(!m.excluded);
        match m.kind {
            MemberKind::Property { public_get, public_set, .. } => {
                assert!(public_get);
                assert!(!public_set);
            }
            _ => panic!("expected property"),
        }
    }
}
