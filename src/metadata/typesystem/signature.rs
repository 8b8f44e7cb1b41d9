//! Encoding of type reference graphs into signature blobs, ECMA-335 II.23.2.12.

use crate::{
    file::io::{write_compressed_int, write_compressed_uint},
    metadata::{
        tables::{CodedIndex, CodedIndexType},
        typesystem::{ArrayShape, SpecificationKind, TypeReference, ELEMENT_TYPE},
    },
    Error, Result,
};

/// Appends the signature encoding of `ty` to `blob`.
///
/// Built-in types are written as their single element type byte. Other named types are
/// written as `CLASS` or `VALUETYPE` followed by the compressed `TypeDefOrRef` index that
/// `token_of` assigns to them. Custom modifiers are written the same way, so `token_of` also
/// receives modifier types, and maps a modifier that is itself a specification to a
/// `TypeSpec` row.
///
/// # Errors
/// Returns the errors of `token_of`, [`Error::CodedIndexMismatch`] if it returns an index of
/// another kind, and [`Error::Malformed`] for values outside the compressed integer range.
///
/// # Examples
///
/// ```rust
/// use cilmeta::metadata::{
///     tables::{CodedIndex, CodedIndexType, TableId},
///     typesystem::{write_type_signature, ElementType, TypeReference},
/// };
///
/// let int32 = TypeReference::primitive(ElementType::I4, None);
/// let vector = TypeReference::vector(int32)?;
///
/// let mut blob = Vec::new();
/// write_type_signature(&mut blob, &vector, &mut |_: &TypeReference| {
///     CodedIndex::new(CodedIndexType::TypeDefOrRef, TableId::TypeRef, 1)
/// })?;
/// assert_eq!(blob, [0x1D, 0x08]);
/// # Ok::<(), cilmeta::Error>(())
/// ```
pub fn write_type_signature<F>(blob: &mut Vec<u8>, ty: &TypeReference, token_of: &mut F) -> Result<()>
where
    F: FnMut(&TypeReference) -> Result<CodedIndex>,
{
    match ty {
        TypeReference::Named(named) => {
            blob.push(ty.metadata_type());
            if named.primitive.is_none() {
                write_type_def_or_ref(blob, ty, token_of)?;
            }
        }
        TypeReference::GenericParameter(parameter) => {
            blob.push(ty.metadata_type());
            write_compressed_uint(blob, u32::from(parameter.position))?;
        }
        TypeReference::Specification(spec) => match spec.kind() {
            SpecificationKind::Array(shape) if shape.is_vector() => {
                blob.push(ELEMENT_TYPE::SZARRAY);
                write_type_signature(blob, spec.element_type(), token_of)?;
            }
            SpecificationKind::Array(shape) => {
                blob.push(ELEMENT_TYPE::ARRAY);
                write_type_signature(blob, spec.element_type(), token_of)?;
                write_array_shape(blob, shape)?;
            }
            SpecificationKind::RequiredModifier(modifier)
            | SpecificationKind::OptionalModifier(modifier) => {
                blob.push(spec.kind().element_code());
                write_type_def_or_ref(blob, modifier, token_of)?;
                write_type_signature(blob, spec.element_type(), token_of)?;
            }
            SpecificationKind::GenericInstance(arguments) => {
                blob.push(ELEMENT_TYPE::GENERICINST);
                write_type_signature(blob, spec.element_type(), token_of)?;
                let count = u32::try_from(arguments.len()).map_err(|_| {
                    malformed_error!("Too many generic arguments: {}", arguments.len())
                })?;
                write_compressed_uint(blob, count)?;
                for argument in arguments {
                    write_type_signature(blob, argument, token_of)?;
                }
            }
            SpecificationKind::Pointer
            | SpecificationKind::ByRef
            | SpecificationKind::Pinned
            | SpecificationKind::Sentinel => {
                blob.push(spec.kind().element_code());
                write_type_signature(blob, spec.element_type(), token_of)?;
            }
        },
    }

    Ok(())
}

fn write_type_def_or_ref<F>(blob: &mut Vec<u8>, ty: &TypeReference, token_of: &mut F) -> Result<()>
where
    F: FnMut(&TypeReference) -> Result<CodedIndex>,
{
    let index = token_of(ty)?;
    if index.ci_type != CodedIndexType::TypeDefOrRef {
        return Err(Error::CodedIndexMismatch {
            coded_index: CodedIndexType::TypeDefOrRef,
            table: index.tag,
        });
    }

    write_compressed_uint(blob, index.encoded())
}

// rank, sizes of the sized dimensions, lower bounds of the bounded dimensions; ArrayShape
// keeps both kinds of bound in leading runs
fn write_array_shape(blob: &mut Vec<u8>, shape: &ArrayShape) -> Result<()> {
    let dimensions = shape.dimensions();
    let rank = u32::try_from(dimensions.len())
        .map_err(|_| malformed_error!("Array rank {} is too large", dimensions.len()))?;
    write_compressed_uint(blob, rank)?;

    let sizes = dimensions
        .iter()
        .filter_map(|dimension| Some((dimension.lower_bound?, dimension.upper_bound?)))
        .map(|(lower, upper)| {
            let size = i64::from(upper) - i64::from(lower) + 1;
            u32::try_from(size).map_err(|_| malformed_error!("Invalid array dimension size {}", size))
        })
        .collect::<Result<Vec<u32>>>()?;
    let lower_bounds: Vec<i32> = dimensions
        .iter()
        .filter_map(|dimension| dimension.lower_bound)
        .collect();

    #[allow(clippy::cast_possible_truncation)]
    write_compressed_uint(blob, sizes.len() as u32)?;
    for size in sizes {
        write_compressed_uint(blob, size)?;
    }

    #[allow(clippy::cast_possible_truncation)]
    write_compressed_uint(blob, lower_bounds.len() as u32)?;
    for lower in lower_bounds {
        write_compressed_int(blob, lower)?;
    }

    Ok(())
}
