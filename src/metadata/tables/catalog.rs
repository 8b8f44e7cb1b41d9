//! The complete table set of a module and its serialization into the `#~` stream.
//!
//! [`MetadataTables`] owns one row store per ECMA-335 and portable PDB table. Callers
//! add rows carrying already-resolved heap offsets, row ids and coded indices;
//! [`MetadataTables::write`] sorts the sorted tables and produces the compressed tables
//! stream (II.24.2.6):
//!
//! | Offset | Size | Field                                  |
//! |--------|------|----------------------------------------|
//! | 0      | 4    | Reserved, 0                            |
//! | 4      | 1    | MajorVersion, 2                        |
//! | 5      | 1    | MinorVersion, 0                        |
//! | 6      | 1    | HeapSizes                              |
//! | 7      | 1    | Reserved, 1                            |
//! | 8      | 8    | Valid, bit vector of present tables    |
//! | 16     | 8    | Sorted, bit vector of sorted tables    |
//! | 24     | 4*n  | Row counts of the present tables       |
//!
//! followed by the rows of every present table in table id order, padded to 4 bytes.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    file::io::read_le_at,
    metadata::tables::{
        AssemblyOsRaw, AssemblyProcessorRaw, AssemblyRaw, AssemblyRefOsRaw,
        AssemblyRefProcessorRaw, AssemblyRefRaw, ClassLayoutRaw, ConstantRaw,
        CustomAttributeRaw, CustomDebugInformationRaw, DeclSecurityRaw, DocumentRaw,
        EncLogRaw, EncMapRaw, EventMapRaw, EventPtrRaw, EventRaw, ExportedTypeRaw,
        FieldLayoutRaw, FieldMarshalRaw, FieldPtrRaw, FieldRaw, FieldRvaRaw, FileRaw,
        GenericParamConstraintRaw, GenericParamRaw, HeapSizes, ImplMapRaw, ImportScopeRaw,
        InterfaceImplRaw, LocalConstantRaw, LocalScopeRaw, LocalVariableRaw,
        ManifestResourceRaw, MemberRefRaw, MethodDebugInformationRaw, MethodDefRaw,
        MethodImplRaw, MethodPtrRaw, MethodSemanticsRaw, MethodSpecRaw, ModuleRaw,
        ModuleRefRaw, NestedClassRaw, ParamPtrRaw, ParamRaw, PropertyMapRaw, PropertyPtrRaw,
        PropertyRaw, SingletonTable, SortedTable, StandAloneSigRaw, StateMachineMethodRaw,
        Table, TableBuffer, TableId, TableInfo, TableWrite, TypeDefRaw, TypeRefRaw,
        TypeSpecRaw,
    },
    Result,
};

/// Major version of the tables stream format written by [`MetadataTables::write`].
pub const TABLES_MAJOR_VERSION: u8 = 2;
/// Minor version of the tables stream format written by [`MetadataTables::write`].
pub const TABLES_MINOR_VERSION: u8 = 0;

/// All metadata tables of one module.
///
/// Tables that hold rows referenced by ranges from an owner (`Field`, `MethodDef`,
/// `Param`, `Event`, `Property`, `LocalVariable`, `LocalConstant`) are insertion ordered;
/// the sorted tables are reordered by their key when the set is written.
#[allow(missing_docs)]
pub struct MetadataTables {
    pub module: SingletonTable<ModuleRaw>,
    pub type_ref: Table<TypeRefRaw>,
    pub type_def: Table<TypeDefRaw>,
    pub field_ptr: Table<FieldPtrRaw>,
    pub field: Table<FieldRaw>,
    pub method_ptr: Table<MethodPtrRaw>,
    pub method_def: Table<MethodDefRaw>,
    pub param_ptr: Table<ParamPtrRaw>,
    pub param: Table<ParamRaw>,
    pub interface_impl: SortedTable<InterfaceImplRaw>,
    pub member_ref: Table<MemberRefRaw>,
    pub constant: SortedTable<ConstantRaw>,
    pub custom_attribute: SortedTable<CustomAttributeRaw>,
    pub field_marshal: SortedTable<FieldMarshalRaw>,
    pub decl_security: SortedTable<DeclSecurityRaw>,
    pub class_layout: SortedTable<ClassLayoutRaw>,
    pub field_layout: SortedTable<FieldLayoutRaw>,
    pub stand_alone_sig: Table<StandAloneSigRaw>,
    pub event_map: Table<EventMapRaw>,
    pub event_ptr: Table<EventPtrRaw>,
    pub event: Table<EventRaw>,
    pub property_map: Table<PropertyMapRaw>,
    pub property_ptr: Table<PropertyPtrRaw>,
    pub property: Table<PropertyRaw>,
    pub method_semantics: SortedTable<MethodSemanticsRaw>,
    pub method_impl: SortedTable<MethodImplRaw>,
    pub module_ref: Table<ModuleRefRaw>,
    pub type_spec: Table<TypeSpecRaw>,
    pub impl_map: SortedTable<ImplMapRaw>,
    pub field_rva: SortedTable<FieldRvaRaw>,
    pub enc_log: Table<EncLogRaw>,
    pub enc_map: Table<EncMapRaw>,
    /// Present for assemblies, absent for netmodules
    pub assembly: Option<SingletonTable<AssemblyRaw>>,
    pub assembly_processor: Table<AssemblyProcessorRaw>,
    pub assembly_os: Table<AssemblyOsRaw>,
    pub assembly_ref: Table<AssemblyRefRaw>,
    pub assembly_ref_processor: Table<AssemblyRefProcessorRaw>,
    pub assembly_ref_os: Table<AssemblyRefOsRaw>,
    pub file: Table<FileRaw>,
    pub exported_type: Table<ExportedTypeRaw>,
    pub manifest_resource: Table<ManifestResourceRaw>,
    pub nested_class: SortedTable<NestedClassRaw>,
    pub generic_param: SortedTable<GenericParamRaw>,
    pub method_spec: Table<MethodSpecRaw>,
    pub generic_param_constraint: SortedTable<GenericParamConstraintRaw>,
    pub document: Table<DocumentRaw>,
    pub method_debug_information: Table<MethodDebugInformationRaw>,
    pub local_scope: SortedTable<LocalScopeRaw>,
    pub local_variable: Table<LocalVariableRaw>,
    pub local_constant: Table<LocalConstantRaw>,
    pub import_scope: Table<ImportScopeRaw>,
    pub state_machine_method: SortedTable<StateMachineMethodRaw>,
    pub custom_debug_information: SortedTable<CustomDebugInformationRaw>,
}

macro_rules! collect_tables {
    ($self:ident, $ty:ty, $($borrow:tt)+) => {{
        let mut tables: Vec<$ty> = vec![
            $($borrow)+ $self.module as $ty,
            $($borrow)+ $self.type_ref as $ty,
            $($borrow)+ $self.type_def as $ty,
            $($borrow)+ $self.field_ptr as $ty,
            $($borrow)+ $self.field as $ty,
            $($borrow)+ $self.method_ptr as $ty,
            $($borrow)+ $self.method_def as $ty,
            $($borrow)+ $self.param_ptr as $ty,
            $($borrow)+ $self.param as $ty,
            $($borrow)+ $self.interface_impl as $ty,
            $($borrow)+ $self.member_ref as $ty,
            $($borrow)+ $self.constant as $ty,
            $($borrow)+ $self.custom_attribute as $ty,
            $($borrow)+ $self.field_marshal as $ty,
            $($borrow)+ $self.decl_security as $ty,
            $($borrow)+ $self.class_layout as $ty,
            $($borrow)+ $self.field_layout as $ty,
            $($borrow)+ $self.stand_alone_sig as $ty,
            $($borrow)+ $self.event_map as $ty,
            $($borrow)+ $self.event_ptr as $ty,
            $($borrow)+ $self.event as $ty,
            $($borrow)+ $self.property_map as $ty,
            $($borrow)+ $self.property_ptr as $ty,
            $($borrow)+ $self.property as $ty,
            $($borrow)+ $self.method_semantics as $ty,
            $($borrow)+ $self.method_impl as $ty,
            $($borrow)+ $self.module_ref as $ty,
            $($borrow)+ $self.type_spec as $ty,
            $($borrow)+ $self.impl_map as $ty,
            $($borrow)+ $self.field_rva as $ty,
            $($borrow)+ $self.enc_log as $ty,
            $($borrow)+ $self.enc_map as $ty,
            $($borrow)+ $self.assembly_processor as $ty,
            $($borrow)+ $self.assembly_os as $ty,
            $($borrow)+ $self.assembly_ref as $ty,
            $($borrow)+ $self.assembly_ref_processor as $ty,
            $($borrow)+ $self.assembly_ref_os as $ty,
            $($borrow)+ $self.file as $ty,
            $($borrow)+ $self.exported_type as $ty,
            $($borrow)+ $self.manifest_resource as $ty,
            $($borrow)+ $self.nested_class as $ty,
            $($borrow)+ $self.generic_param as $ty,
            $($borrow)+ $self.method_spec as $ty,
            $($borrow)+ $self.generic_param_constraint as $ty,
            $($borrow)+ $self.document as $ty,
            $($borrow)+ $self.method_debug_information as $ty,
            $($borrow)+ $self.local_scope as $ty,
            $($borrow)+ $self.local_variable as $ty,
            $($borrow)+ $self.local_constant as $ty,
            $($borrow)+ $self.import_scope as $ty,
            $($borrow)+ $self.state_machine_method as $ty,
            $($borrow)+ $self.custom_debug_information as $ty,
        ];
        if let Some(assembly) = $($borrow)+ $self.assembly {
            tables.push(assembly);
        }
        tables.sort_by_key(|table| table.table_id());
        tables
    }};
}

impl MetadataTables {
    /// Creates an empty table set for a module described by `module`.
    #[must_use]
    pub fn new(module: ModuleRaw) -> Self {
        MetadataTables {
            module: SingletonTable::new(module),
            type_ref: Table::new(),
            type_def: Table::new(),
            field_ptr: Table::new(),
            field: Table::new(),
            method_ptr: Table::new(),
            method_def: Table::new(),
            param_ptr: Table::new(),
            param: Table::new(),
            interface_impl: SortedTable::new(),
            member_ref: Table::new(),
            constant: SortedTable::new(),
            custom_attribute: SortedTable::new(),
            field_marshal: SortedTable::new(),
            decl_security: SortedTable::new(),
            class_layout: SortedTable::new(),
            field_layout: SortedTable::new(),
            stand_alone_sig: Table::new(),
            event_map: Table::new(),
            event_ptr: Table::new(),
            event: Table::new(),
            property_map: Table::new(),
            property_ptr: Table::new(),
            property: Table::new(),
            method_semantics: SortedTable::new(),
            method_impl: SortedTable::new(),
            module_ref: Table::new(),
            type_spec: Table::new(),
            impl_map: SortedTable::new(),
            field_rva: SortedTable::new(),
            enc_log: Table::new(),
            enc_map: Table::new(),
            assembly: None,
            assembly_processor: Table::new(),
            assembly_os: Table::new(),
            assembly_ref: Table::new(),
            assembly_ref_processor: Table::new(),
            assembly_ref_os: Table::new(),
            file: Table::new(),
            exported_type: Table::new(),
            manifest_resource: Table::new(),
            nested_class: SortedTable::new(),
            generic_param: SortedTable::new(),
            method_spec: Table::new(),
            generic_param_constraint: SortedTable::new(),
            document: Table::new(),
            method_debug_information: Table::new(),
            local_scope: SortedTable::new(),
            local_variable: Table::new(),
            local_constant: Table::new(),
            import_scope: Table::new(),
            state_machine_method: SortedTable::new(),
            custom_debug_information: SortedTable::new(),
        }
    }

    /// Sets the manifest row, turning the module into an assembly.
    pub fn set_assembly(&mut self, assembly: AssemblyRaw) {
        self.assembly = Some(SingletonTable::new(assembly));
    }

    /// Every table in table id order.
    #[must_use]
    pub fn tables(&self) -> Vec<&dyn TableWrite> {
        collect_tables!(self, &dyn TableWrite, &)
    }

    fn tables_mut(&mut self) -> Vec<&mut dyn TableWrite> {
        collect_tables!(self, &mut dyn TableWrite, &mut)
    }

    /// Number of rows currently held by `table`.
    #[must_use]
    pub fn row_count(&self, table: TableId) -> u32 {
        self.tables()
            .iter()
            .find(|candidate| candidate.table_id() == table)
            .map_or(0, |candidate| candidate.row_count())
    }

    /// Bit vector of the tables holding at least one row.
    #[must_use]
    pub fn valid_mask(&self) -> u64 {
        self.tables()
            .iter()
            .filter(|table| table.row_count() > 0)
            .fold(0, |mask, table| mask | table.table_id().mask())
    }

    /// Bit vector of the tables whose rows are ordered by a key.
    #[must_use]
    pub fn sorted_mask(&self) -> u64 {
        self.tables()
            .iter()
            .filter(|table| table.is_sorted_table())
            .fold(0, |mask, table| mask | table.table_id().mask())
    }

    /// Size information of the current row counts combined with `heap_sizes`.
    #[must_use]
    pub fn table_info(&self, heap_sizes: HeapSizes) -> TableInfo {
        let rows: Vec<(TableId, u32)> = self
            .tables()
            .iter()
            .map(|table| (table.table_id(), table.row_count()))
            .collect();

        TableInfo::new(rows, heap_sizes)
    }

    /// Sorts every sorted table by its key. Idempotent.
    pub fn sort(&mut self) {
        for table in self.tables_mut() {
            if table.is_sorted_table() {
                trace!(table = ?table.table_id(), rows = table.row_count(), "sorting table");
            }
            table.prepare();
        }
    }

    /// Sorts the sorted tables and serializes the set into a `#~` stream.
    ///
    /// `heap_sizes` must describe the heaps the rows point into.
    ///
    /// # Errors
    /// Returns an error if a value does not fit its column, for example a heap offset
    /// above `0xFFFF` without the matching [`HeapSizes`] flag.
    pub fn write(&mut self, heap_sizes: HeapSizes) -> Result<Vec<u8>> {
        self.sort();

        let info = Arc::new(self.table_info(heap_sizes));
        let tables = self.tables();
        let present: Vec<&dyn TableWrite> = tables
            .into_iter()
            .filter(|table| table.row_count() > 0)
            .collect();

        let capacity = 24
            + present.len() * 4
            + present
                .iter()
                .map(|table| table.row_count() as usize * table.row_size(&info) as usize)
                .sum::<usize>();
        let mut buffer = TableBuffer::with_capacity(info.clone(), capacity);

        buffer.write_u32(0);
        buffer.write_u8(TABLES_MAJOR_VERSION);
        buffer.write_u8(TABLES_MINOR_VERSION);
        buffer.write_u8(heap_sizes.bits());
        buffer.write_u8(1);
        buffer.write_bytes(&self.valid_mask().to_le_bytes());
        buffer.write_bytes(&self.sorted_mask().to_le_bytes());

        for table in &present {
            buffer.write_u32(table.row_count());
        }

        for table in &present {
            let start = buffer.len();
            table.write(&mut buffer)?;
            debug!(
                table = ?table.table_id(),
                rows = table.row_count(),
                bytes = buffer.len() - start,
                "wrote table"
            );
        }

        buffer.align(4);
        debug!(tables = present.len(), bytes = buffer.len(), "wrote tables stream");
        Ok(buffer.into_inner())
    }
}

/// The decoded header of a `#~` stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablesHeader {
    /// Major format version
    pub major_version: u8,
    /// Minor format version
    pub minor_version: u8,
    /// Width flags of heap references
    pub heap_sizes: HeapSizes,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts of the present tables, in table id order
    pub rows: Vec<(TableId, u32)>,
    /// Offset of the first row of the first present table
    pub rows_offset: usize,
}

impl TablesHeader {
    /// Parses the header at the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated data and
    /// [`crate::Error::Malformed`] if a valid bit names an unknown table.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut offset = 4;
        let major_version = read_le_at::<u8>(data, &mut offset)?;
        let minor_version = read_le_at::<u8>(data, &mut offset)?;
        let heap_sizes = HeapSizes::from_bits_truncate(read_le_at::<u8>(data, &mut offset)?);
        offset += 1;
        let valid = read_le_at::<u64>(data, &mut offset)?;
        let sorted = read_le_at::<u64>(data, &mut offset)?;

        let mut rows = Vec::new();
        for bit in 0..64_u8 {
            if valid & (1 << bit) == 0 {
                continue;
            }

            let table = TableId::from_u8(bit)
                .ok_or_else(|| malformed_error!("Unknown table 0x{:02x} in valid mask", bit))?;
            rows.push((table, read_le_at::<u32>(data, &mut offset)?));
        }

        Ok(TablesHeader {
            major_version,
            minor_version,
            heap_sizes,
            valid,
            sorted,
            rows,
            rows_offset: offset,
        })
    }

    /// Size information matching the parsed row counts.
    #[must_use]
    pub fn table_info(&self) -> TableInfo {
        TableInfo::new(self.rows.iter().copied(), self.heap_sizes)
    }

    /// Row count of `table`, 0 if absent.
    #[must_use]
    pub fn row_count(&self, table: TableId) -> u32 {
        self.rows
            .iter()
            .find(|(id, _)| *id == table)
            .map_or(0, |(_, count)| *count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tables::{
        read_rows, CodedIndex, CodedIndexType, RowWritable,
    };

    fn tables() -> MetadataTables {
        MetadataTables::new(ModuleRaw::new(1, 1))
    }

    #[test]
    fn empty_module_stream() {
        let mut tables = tables();
        let stream = tables.write(HeapSizes::empty()).unwrap();

        let header = TablesHeader::parse(&stream).unwrap();
        assert_eq!(header.major_version, 2);
        assert_eq!(header.minor_version, 0);
        assert_eq!(header.valid, 1);
        assert_eq!(header.rows, vec![(TableId::Module, 1)]);
        assert_eq!(header.rows_offset, 28);
        // header + module row, padded to 4
        assert_eq!(stream.len(), 40);
        assert_eq!(stream[7], 1);
    }

    #[test]
    fn sorted_mask_covers_sorted_tables() {
        let tables = tables();
        let mask = tables.sorted_mask();

        for id in [
            TableId::InterfaceImpl,
            TableId::Constant,
            TableId::CustomAttribute,
            TableId::FieldMarshal,
            TableId::DeclSecurity,
            TableId::ClassLayout,
            TableId::FieldLayout,
            TableId::MethodSemantics,
            TableId::MethodImpl,
            TableId::ImplMap,
            TableId::FieldRVA,
            TableId::NestedClass,
            TableId::GenericParam,
            TableId::GenericParamConstraint,
            TableId::LocalScope,
            TableId::StateMachineMethod,
            TableId::CustomDebugInformation,
        ] {
            assert_ne!(mask & id.mask(), 0, "{id:?}");
        }

        assert_eq!(mask & TableId::Field.mask(), 0);
        assert_eq!(mask.count_ones(), 17);
    }

    #[test]
    fn assembly_row_is_optional() {
        let mut tables = tables();
        assert_eq!(tables.row_count(TableId::Assembly), 0);

        tables.set_assembly(AssemblyRaw {
            hash_alg_id: 0x8004,
            major_version: 1,
            minor_version: 0,
            build_number: 0,
            revision_number: 0,
            flags: 0,
            public_key: 0,
            name: 1,
            culture: 0,
        });
        assert_eq!(tables.row_count(TableId::Assembly), 1);
        assert_ne!(tables.valid_mask() & TableId::Assembly.mask(), 0);
    }

    #[test]
    fn rows_follow_header_in_table_order() {
        let mut tables = tables();
        let first = tables.field.add_row(FieldRaw {
            flags: 0x0006,
            name: 2,
            signature: 1,
        });
        tables.constant.add_row(ConstantRaw {
            base: 0x08,
            parent: CodedIndex::new(CodedIndexType::HasConstant, TableId::Field, first).unwrap(),
            value: 4,
        });

        let stream = tables.write(HeapSizes::empty()).unwrap();
        let header = TablesHeader::parse(&stream).unwrap();
        let info = header.table_info();

        let fields_offset = header.rows_offset + ModuleRaw::row_size(&info) as usize;
        let fields = read_rows::<FieldRaw>(&stream, fields_offset, 1, &info).unwrap();
        assert_eq!(fields[0].name, 2);

        let constants_offset = fields_offset + FieldRaw::row_size(&info) as usize;
        let constants = read_rows::<ConstantRaw>(&stream, constants_offset, 1, &info).unwrap();
        assert_eq!(constants[0].parent.row, first);
        assert_eq!(constants[0].parent.tag, TableId::Field);
    }

    #[test]
    fn large_heap_offsets_need_flags() {
        let mut tables = tables();
        tables.field.add_row(FieldRaw {
            flags: 0,
            name: 0x1_0000,
            signature: 1,
        });

        assert!(tables.write(HeapSizes::empty()).is_err());
        assert!(tables.write(HeapSizes::STRINGS).is_ok());
    }
}
