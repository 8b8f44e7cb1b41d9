//! # Coded Index Types Module
//!
//! Coded indices combine a table identifier and row index into a single value by using the
//! lower bits to encode which table is referenced, and the remaining bits for the row id.
//! This allows a single column to reference different kinds of entities (e.g. a `TypeDef`,
//! `TypeRef` or `TypeSpec`).
//!
//! The tag occupies `ceil(log2(n))` low bits, where `n` is the number of target tables of
//! the kind. The column is 2 bytes wide when the largest target table still fits into the
//! remaining `16 - tag_bits` bits, 4 bytes otherwise (see
//! [`crate::metadata::tables::TableInfo::coded_index_bytes`]).
//!
//! ## References
//!
//! - [ECMA-335 Standard](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf) - Section II.24.2.6

use std::cmp::Ordering;

use strum::{EnumCount, EnumIter};

use crate::{
    metadata::{tables::TableId, token::Token},
    Error, Result,
};

/// All coded index kinds defined by ECMA-335, plus the portable PDB
/// `HasCustomDebugInformation` kind.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, EnumCount)]
#[repr(usize)]
pub enum CodedIndexType {
    /// `TypeDef`, `TypeRef` or `TypeSpec`
    TypeDefOrRef,
    /// `Field`, `Param` or `Property`
    HasConstant,
    /// Any entity that can carry a custom attribute
    HasCustomAttribute,
    /// `Field` or `Param`
    HasFieldMarshal,
    /// `TypeDef`, `MethodDef` or `Assembly`
    HasDeclSecurity,
    /// Parent of a `MemberRef`
    MemberRefParent,
    /// `Event` or `Property`
    HasSemantics,
    /// `MethodDef` or `MemberRef`
    MethodDefOrRef,
    /// `Field` or `MethodDef`
    MemberForwarded,
    /// `File`, `AssemblyRef` or `ExportedType`
    Implementation,
    /// Constructor of a custom attribute, `MethodDef` or `MemberRef`
    CustomAttributeType,
    /// `Module`, `ModuleRef`, `AssemblyRef` or `TypeRef`
    ResolutionScope,
    /// `TypeDef` or `MethodDef`
    TypeOrMethodDef,
    /// Any entity that can carry portable PDB custom debug information
    HasCustomDebugInformation,
}

impl CodedIndexType {
    /// Target tables of this coded index, indexed by tag.
    ///
    /// `None` marks tag values that are reserved and never produced.
    #[must_use]
    pub fn tables(&self) -> &'static [Option<TableId>] {
        match self {
            CodedIndexType::TypeDefOrRef => &[
                Some(TableId::TypeDef),
                Some(TableId::TypeRef),
                Some(TableId::TypeSpec),
            ],
            CodedIndexType::HasConstant => &[
                Some(TableId::Field),
                Some(TableId::Param),
                Some(TableId::Property),
            ],
            CodedIndexType::HasCustomAttribute => &[
                Some(TableId::MethodDef),
                Some(TableId::Field),
                Some(TableId::TypeRef),
                Some(TableId::TypeDef),
                Some(TableId::Param),
                Some(TableId::InterfaceImpl),
                Some(TableId::MemberRef),
                Some(TableId::Module),
                // The standard labels this slot 'Permission', the table is DeclSecurity
                Some(TableId::DeclSecurity),
                Some(TableId::Property),
                Some(TableId::Event),
                Some(TableId::StandAloneSig),
                Some(TableId::ModuleRef),
                Some(TableId::TypeSpec),
                Some(TableId::Assembly),
                Some(TableId::AssemblyRef),
                Some(TableId::File),
                Some(TableId::ExportedType),
                Some(TableId::ManifestResource),
                Some(TableId::GenericParam),
                Some(TableId::GenericParamConstraint),
                Some(TableId::MethodSpec),
            ],
            CodedIndexType::HasFieldMarshal => &[Some(TableId::Field), Some(TableId::Param)],
            CodedIndexType::HasDeclSecurity => &[
                Some(TableId::TypeDef),
                Some(TableId::MethodDef),
                Some(TableId::Assembly),
            ],
            CodedIndexType::MemberRefParent => &[
                Some(TableId::TypeDef),
                Some(TableId::TypeRef),
                Some(TableId::ModuleRef),
                Some(TableId::MethodDef),
                Some(TableId::TypeSpec),
            ],
            CodedIndexType::HasSemantics => &[Some(TableId::Event), Some(TableId::Property)],
            CodedIndexType::MethodDefOrRef => &[Some(TableId::MethodDef), Some(TableId::MemberRef)],
            CodedIndexType::MemberForwarded => &[Some(TableId::Field), Some(TableId::MethodDef)],
            CodedIndexType::Implementation => &[
                Some(TableId::File),
                Some(TableId::AssemblyRef),
                Some(TableId::ExportedType),
            ],
            CodedIndexType::CustomAttributeType => &[
                None,
                None,
                Some(TableId::MethodDef),
                Some(TableId::MemberRef),
                None,
            ],
            CodedIndexType::ResolutionScope => &[
                Some(TableId::Module),
                Some(TableId::ModuleRef),
                Some(TableId::AssemblyRef),
                Some(TableId::TypeRef),
            ],
            CodedIndexType::TypeOrMethodDef => &[Some(TableId::TypeDef), Some(TableId::MethodDef)],
            CodedIndexType::HasCustomDebugInformation => &[
                Some(TableId::MethodDef),
                Some(TableId::Field),
                Some(TableId::TypeRef),
                Some(TableId::TypeDef),
                Some(TableId::Param),
                Some(TableId::InterfaceImpl),
                Some(TableId::MemberRef),
                Some(TableId::Module),
                Some(TableId::DeclSecurity),
                Some(TableId::Property),
                Some(TableId::Event),
                Some(TableId::StandAloneSig),
                Some(TableId::ModuleRef),
                Some(TableId::TypeSpec),
                Some(TableId::Assembly),
                Some(TableId::AssemblyRef),
                Some(TableId::File),
                Some(TableId::ExportedType),
                Some(TableId::ManifestResource),
                Some(TableId::GenericParam),
                Some(TableId::GenericParamConstraint),
                Some(TableId::MethodSpec),
                Some(TableId::Document),
                Some(TableId::LocalScope),
                Some(TableId::LocalVariable),
                Some(TableId::LocalConstant),
                Some(TableId::ImportScope),
            ],
        }
    }

    /// Number of low bits holding the tag, `ceil(log2(tables().len()))`.
    #[must_use]
    pub fn tag_bits(&self) -> u8 {
        let count = self.tables().len();
        if count <= 1 {
            return 0;
        }

        // Safe: the result is at most usize::BITS
        #[allow(clippy::cast_possible_truncation)]
        let bits = (usize::BITS - (count - 1).leading_zeros()) as u8;
        bits
    }

    /// Tag value selecting `table`, if `table` is a target of this kind.
    #[must_use]
    pub fn tag_of(&self, table: TableId) -> Option<u32> {
        self.tables()
            .iter()
            .position(|slot| *slot == Some(table))
            .and_then(|tag| u32::try_from(tag).ok())
    }

    /// Largest row id that can be packed next to the tag in 32 bits.
    #[must_use]
    pub fn max_row(&self) -> u32 {
        u32::MAX >> self.tag_bits()
    }

    /// Packs `row` of `table` into the raw coded index value.
    ///
    /// # Errors
    /// Returns [`Error::CodedIndexMismatch`] if `table` is not a target of this kind, and
    /// [`Error::Validation`] if `row` does not fit next to the tag.
    pub fn encode(&self, table: TableId, row: u32) -> Result<u32> {
        let tag = self.tag_of(table).ok_or(Error::CodedIndexMismatch {
            coded_index: *self,
            table,
        })?;

        if row > self.max_row() {
            return Err(Error::Validation(format!(
                "row {} of {:?} does not fit into coded index {:?}",
                row, table, self
            )));
        }

        Ok((row << self.tag_bits()) | tag)
    }

    /// Splits a raw coded index value into its target table and row id.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the tag selects no table.
    pub fn decode(&self, value: u32) -> Result<(TableId, u32)> {
        let bits = self.tag_bits();
        let mask = (1_u32 << bits) - 1;
        let tag = (value & mask) as usize;

        match self.tables().get(tag) {
            Some(Some(table)) => Ok((*table, value >> bits)),
            _ => Err(malformed_error!(
                "Invalid tag {} for coded index {:?}",
                tag,
                self
            )),
        }
    }

    fn first_table(&self) -> TableId {
        self.tables()
            .iter()
            .flatten()
            .copied()
            .next()
            .unwrap_or(TableId::Module)
    }
}

/// A coded index column value: a row of one of the target tables of `ci_type`.
///
/// The target table is validated at construction, so encoding never fails afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodedIndex {
    /// The coded index kind of the column holding this value
    pub ci_type: CodedIndexType,
    /// The `TableId` this index points into
    pub tag: TableId,
    /// The 1-based row id inside `tag`, 0 for a null reference
    pub row: u32,
    /// The token of the referenced entity
    pub token: Token,
}

impl CodedIndex {
    /// Creates a coded index referencing `row` of `tag`.
    ///
    /// # Errors
    /// Returns [`Error::CodedIndexMismatch`] if `tag` is not a target of `ci_type`, and
    /// [`Error::Validation`] if `row` does not fit next to the tag.
    pub fn new(ci_type: CodedIndexType, tag: TableId, row: u32) -> Result<Self> {
        ci_type.encode(tag, row)?;

        Ok(CodedIndex {
            ci_type,
            tag,
            row,
            token: Token::from_parts(tag, row),
        })
    }

    /// A null reference for a column of kind `ci_type`; encodes as `0`.
    #[must_use]
    pub fn null(ci_type: CodedIndexType) -> Self {
        let tag = ci_type.first_table();
        CodedIndex {
            ci_type,
            tag,
            row: 0,
            token: Token::from_parts(tag, 0),
        }
    }

    /// Creates a coded index from the metadata token of the referenced entity.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] for unknown table numbers and the errors of
    /// [`CodedIndex::new`].
    pub fn from_token(ci_type: CodedIndexType, token: Token) -> Result<Self> {
        let table = TableId::from_u8(token.table()).ok_or_else(|| {
            malformed_error!("Unknown table ID: 0x{:02x}", token.table())
        })?;

        CodedIndex::new(ci_type, table, token.row())
    }

    /// Decodes a raw column value of kind `ci_type`.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the tag selects no table.
    pub fn decode(ci_type: CodedIndexType, value: u32) -> Result<Self> {
        if value == 0 {
            return Ok(CodedIndex::null(ci_type));
        }

        let (tag, row) = ci_type.decode(value)?;
        Ok(CodedIndex {
            ci_type,
            tag,
            row,
            token: Token::from_parts(tag, row),
        })
    }

    /// Returns true if this index references no row.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.row == 0
    }

    /// The raw encoded value, `(row << tag_bits) | tag`.
    #[must_use]
    pub fn encoded(&self) -> u32 {
        if self.row == 0 {
            return 0;
        }

        let tag = self.ci_type.tag_of(self.tag).unwrap_or(0);
        (self.row << self.ci_type.tag_bits()) | tag
    }
}

impl PartialOrd for CodedIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by the raw encoded value, which is the order the sorted tables require.
impl Ord for CodedIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.encoded().cmp(&other.encoded())
    }
}
