//! Metadata sanity checks.
//!
//! The engine assumes host-supplied metadata is well-formed; this module is
//! where ill-formed metadata fails loudly instead of silently corrupting
//! generated code. The `check` subcommand runs it over whole inputs, and
//! `emit` runs it before synthesis.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::model::{AnnotatedType, Member, MemberKind, TypeShape};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("`{0}` is not a valid identifier")]
    BadIdentifier(String),
    #[error("array rank must be at least 1")]
    ZeroRankArray,
    #[error("tuple must have at least two elements, got {0}")]
    DegenerateTuple(usize),
    #[error("nullable wrapper directly wraps another nullable wrapper")]
    DoubleNullable,
    #[error("System.Nullable must take exactly one type argument, got {0}")]
    MalformedValueOptional(usize),
    #[error("member `{member}`: {source}")]
    InMember {
        member: String,
        #[source]
        source: Box<MetadataError>,
    },
}

/// Check one annotated type. Stops at the first violation; candidates are
/// independent, so a bad type never blocks checking of its siblings.
pub fn validate_type(ty: &AnnotatedType) -> Result<(), MetadataError> {
    check_identifier(&ty.name)?;
    for tp in &ty.type_params {
        check_identifier(&tp.name)?;
        for shape in &tp.constraints.types {
            validate_shape(shape)?;
        }
    }
    for member in &ty.members {
        validate_member(member).map_err(|source| MetadataError::InMember {
            member: member.name.clone(),
            source: Box::new(source),
        })?;
    }
    Ok(())
}

fn validate_member(member: &Member) -> Result<(), MetadataError> {
    match &member.kind {
        MemberKind::Property { shape, .. } => {
            check_identifier(&member.name)?;
            validate_shape(shape)
        }
        MemberKind::Method { return_shape, type_params, params } => {
            check_identifier(&member.name)?;
            validate_shape(return_shape)?;
            for tp in type_params {
                check_identifier(&tp.name)?;
                for shape in &tp.constraints.types {
                    validate_shape(shape)?;
                }
            }
            for p in params {
                check_identifier(&p.name)?;
                validate_shape(&p.shape)?;
            }
            Ok(())
        }
        // Never rendered, so their payloads are not our problem.
        MemberKind::Event | MemberKind::Indexer => Ok(()),
    }
}

fn validate_shape(shape: &TypeShape) -> Result<(), MetadataError> {
    match shape {
        TypeShape::Primitive(_) => Ok(()),
        TypeShape::Named { .. } => Ok(()),
        TypeShape::TypeParam(name) => check_identifier(name),
        TypeShape::Array { element, rank } => {
            if *rank == 0 {
                return Err(MetadataError::ZeroRankArray);
            }
            validate_shape(element)
        }
        TypeShape::Tuple(elements) => {
            if elements.len() < 2 {
                return Err(MetadataError::DegenerateTuple(elements.len()));
            }
            for el in elements {
                validate_shape(&el.shape)?;
            }
            Ok(())
        }
        TypeShape::Generic { namespace, name, args } => {
            if namespace == "System" && name == "Nullable" && args.len() != 1 {
                return Err(MetadataError::MalformedValueOptional(args.len()));
            }
            for arg in args {
                validate_shape(arg)?;
            }
            Ok(())
        }
        TypeShape::Nullable(inner) => {
            if matches!(**inner, TypeShape::Nullable(_)) {
                return Err(MetadataError::DoubleNullable);
            }
            validate_shape(inner)
        }
        TypeShape::Nested { path, .. } => {
            for part in path {
                check_identifier(part)?;
            }
            Ok(())
        }
    }
}

fn check_identifier(name: &str) -> Result<(), MetadataError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(MetadataError::BadIdentifier(name.to_string()))
    }
}
