//! Every table of the catalog written and read back.
//!
//! One row goes into each table. The rows are serialized once through a complete `#~`
//! stream with 2 byte columns, once with 4 byte heap columns, and once row by row with
//! every table large, then decoded again. For tables with only 2 and 4 byte columns the
//! stream bytes are also compared with the ECMA-335 column order.

use std::sync::Arc;

use cilmeta::{
    metadata::tables::{
        AssemblyOsRaw, AssemblyProcessorRaw, AssemblyRefOsRaw, AssemblyRefProcessorRaw,
        ClassLayoutRaw, CustomDebugInformationRaw, DocumentRaw, EncLogRaw, EncMapRaw,
        EventMapRaw, EventPtrRaw, EventRaw, ExportedTypeRaw, FieldLayoutRaw, FieldPtrRaw,
        GenericParamConstraintRaw, GenericParamRaw, ImplMapRaw, ImportScopeRaw,
        InterfaceImplRaw, LocalConstantRaw, LocalScopeRaw, LocalVariableRaw,
        MethodDebugInformationRaw, MethodImplRaw, MethodPtrRaw, MethodSemanticsRaw,
        MethodSpecRaw, NestedClassRaw, ParamPtrRaw, PropertyMapRaw, PropertyPtrRaw,
        PropertyRaw, StandAloneSigRaw, StateMachineMethodRaw, TableWrite,
    },
    prelude::*,
};
use strum::IntoEnumIterator;

/// Column values of the sample rows: row ids start at `rid`, heap offsets at `heap`.
struct Samples {
    rid: u32,
    heap: u32,
}

impl Samples {
    fn rid(&self, k: u32) -> u32 {
        self.rid + k
    }

    fn heap(&self, k: u32) -> u32 {
        self.heap + k
    }

    fn coded(&self, kind: CodedIndexType, table: TableId, k: u32) -> CodedIndex {
        CodedIndex::new(kind, table, self.rid(k)).unwrap()
    }

    fn module(&self) -> ModuleRaw {
        ModuleRaw {
            generation: 0,
            name: self.heap(50),
            mvid: self.heap(51),
            encid: self.heap(52),
            encbaseid: self.heap(53),
        }
    }

    fn assembly(&self) -> AssemblyRaw {
        AssemblyRaw {
            hash_alg_id: 0x8004,
            major_version: 1,
            minor_version: 2,
            build_number: 3,
            revision_number: 4,
            flags: 0x0001,
            public_key: self.heap(54),
            name: self.heap(55),
            culture: self.heap(56),
        }
    }
}

/// Calls `$callback!($($args)*, field, row)` for a sample row of every table except the
/// `Module` and `Assembly` singletons.
macro_rules! for_each_sample {
    ($samples:expr, $callback:ident!($($args:tt)*)) => {{
        use CodedIndexType as C;
        use TableId as T;
        let s: &Samples = $samples;

        $callback!($($args)*, type_ref, TypeRefRaw {
            resolution_scope: s.coded(C::ResolutionScope, T::AssemblyRef, 1),
            type_name: s.heap(1),
            type_namespace: s.heap(2),
        });
        $callback!($($args)*, type_def, TypeDefRaw {
            flags: 0x0010_0001,
            type_name: s.heap(3),
            type_namespace: s.heap(4),
            extends: s.coded(C::TypeDefOrRef, T::TypeRef, 1),
            field_list: s.rid(1),
            method_list: s.rid(2),
        });
        $callback!($($args)*, field_ptr, FieldPtrRaw { field: s.rid(3) });
        $callback!($($args)*, field, FieldRaw {
            flags: 0x0016,
            name: s.heap(5),
            signature: s.heap(6),
        });
        $callback!($($args)*, method_ptr, MethodPtrRaw { method: s.rid(4) });
        $callback!($($args)*, method_def, MethodDefRaw {
            rva: 0x2050,
            impl_flags: 0x0003,
            flags: 0x0086,
            name: s.heap(7),
            signature: s.heap(8),
            param_list: s.rid(5),
        });
        $callback!($($args)*, param_ptr, ParamPtrRaw { param: s.rid(6) });
        $callback!($($args)*, param, ParamRaw {
            flags: 0x0010,
            sequence: 2,
            name: s.heap(9),
        });
        $callback!($($args)*, interface_impl, InterfaceImplRaw {
            class: s.rid(7),
            interface: s.coded(C::TypeDefOrRef, T::TypeSpec, 2),
        });
        $callback!($($args)*, member_ref, MemberRefRaw {
            class: s.coded(C::MemberRefParent, T::TypeRef, 3),
            name: s.heap(10),
            signature: s.heap(11),
        });
        $callback!($($args)*, constant, ConstantRaw {
            base: 0x08,
            parent: s.coded(C::HasConstant, T::Property, 4),
            value: s.heap(12),
        });
        $callback!($($args)*, custom_attribute, CustomAttributeRaw {
            parent: s.coded(C::HasCustomAttribute, T::Assembly, 1),
            constructor: s.coded(C::CustomAttributeType, T::MemberRef, 5),
            value: s.heap(13),
        });
        $callback!($($args)*, field_marshal, FieldMarshalRaw {
            parent: s.coded(C::HasFieldMarshal, T::Param, 6),
            native_type: s.heap(14),
        });
        $callback!($($args)*, decl_security, DeclSecurityRaw {
            action: 0x0006,
            parent: s.coded(C::HasDeclSecurity, T::MethodDef, 7),
            permission_set: s.heap(15),
        });
        $callback!($($args)*, class_layout, ClassLayoutRaw {
            packing_size: 8,
            class_size: 0x40,
            parent: s.rid(8),
        });
        $callback!($($args)*, field_layout, FieldLayoutRaw {
            field_offset: 0x10,
            field: s.rid(9),
        });
        $callback!($($args)*, stand_alone_sig, StandAloneSigRaw { signature: s.heap(16) });
        $callback!($($args)*, event_map, EventMapRaw {
            parent: s.rid(10),
            event_list: s.rid(11),
        });
        $callback!($($args)*, event_ptr, EventPtrRaw { event: s.rid(12) });
        $callback!($($args)*, event, EventRaw {
            flags: 0x0200,
            name: s.heap(17),
            event_type: s.coded(C::TypeDefOrRef, T::TypeDef, 13),
        });
        $callback!($($args)*, property_map, PropertyMapRaw {
            parent: s.rid(14),
            property_list: s.rid(15),
        });
        $callback!($($args)*, property_ptr, PropertyPtrRaw { property: s.rid(16) });
        $callback!($($args)*, property, PropertyRaw {
            flags: 0x1000,
            name: s.heap(18),
            signature: s.heap(19),
        });
        $callback!($($args)*, method_semantics, MethodSemanticsRaw {
            semantics: 0x0008,
            method: s.rid(17),
            association: s.coded(C::HasSemantics, T::Event, 18),
        });
        $callback!($($args)*, method_impl, MethodImplRaw {
            class: s.rid(19),
            method_body: s.coded(C::MethodDefOrRef, T::MethodDef, 20),
            method_declaration: s.coded(C::MethodDefOrRef, T::MemberRef, 21),
        });
        $callback!($($args)*, module_ref, ModuleRefRaw { name: s.heap(20) });
        $callback!($($args)*, type_spec, TypeSpecRaw { signature: s.heap(21) });
        $callback!($($args)*, impl_map, ImplMapRaw {
            mapping_flags: 0x0101,
            member_forwarded: s.coded(C::MemberForwarded, T::MethodDef, 22),
            import_name: s.heap(22),
            import_scope: s.rid(23),
        });
        $callback!($($args)*, field_rva, FieldRvaRaw {
            rva: 0x4000,
            field: s.rid(24),
        });
        $callback!($($args)*, enc_log, EncLogRaw {
            token_value: 0x0400_0001,
            func_code: 1,
        });
        $callback!($($args)*, enc_map, EncMapRaw { token_value: 0x0600_0002 });
        $callback!($($args)*, assembly_processor, AssemblyProcessorRaw { processor: 0x014C });
        $callback!($($args)*, assembly_os, AssemblyOsRaw {
            os_platform_id: 2,
            os_major_version: 10,
            os_minor_version: 1,
        });
        $callback!($($args)*, assembly_ref, AssemblyRefRaw {
            major_version: 4,
            minor_version: 1,
            build_number: 2,
            revision_number: 3,
            flags: 0x0001,
            public_key_or_token: s.heap(23),
            name: s.heap(24),
            culture: s.heap(25),
            hash_value: s.heap(26),
        });
        $callback!($($args)*, assembly_ref_processor, AssemblyRefProcessorRaw {
            processor: 0x8664,
            assembly_ref: s.rid(25),
        });
        $callback!($($args)*, assembly_ref_os, AssemblyRefOsRaw {
            os_platform_id: 2,
            os_major_version: 6,
            os_minor_version: 2,
            assembly_ref: s.rid(26),
        });
        $callback!($($args)*, file, FileRaw {
            flags: 0x0001,
            name: s.heap(27),
            hash_value: s.heap(28),
        });
        $callback!($($args)*, exported_type, ExportedTypeRaw {
            flags: 0x0010_0001,
            type_def_id: 0x0200_0005,
            type_name: s.heap(29),
            type_namespace: s.heap(30),
            implementation: s.coded(C::Implementation, T::File, 27),
        });
        $callback!($($args)*, manifest_resource, ManifestResourceRaw {
            offset_field: 0x20,
            flags: 0x0002,
            name: s.heap(31),
            implementation: s.coded(C::Implementation, T::AssemblyRef, 28),
        });
        $callback!($($args)*, nested_class, NestedClassRaw {
            nested_class: s.rid(29),
            enclosing_class: s.rid(30),
        });
        $callback!($($args)*, generic_param, GenericParamRaw {
            number: 1,
            flags: 0x0004,
            owner: s.coded(C::TypeOrMethodDef, T::MethodDef, 31),
            name: s.heap(32),
        });
        $callback!($($args)*, method_spec, MethodSpecRaw {
            method: s.coded(C::MethodDefOrRef, T::MemberRef, 32),
            instantiation: s.heap(33),
        });
        $callback!($($args)*, generic_param_constraint, GenericParamConstraintRaw {
            owner: s.rid(33),
            constraint: s.coded(C::TypeDefOrRef, T::TypeRef, 34),
        });
        $callback!($($args)*, document, DocumentRaw {
            name: s.heap(34),
            hash_algorithm: s.heap(35),
            hash: s.heap(36),
            language: s.heap(37),
        });
        $callback!($($args)*, method_debug_information, MethodDebugInformationRaw {
            document: s.rid(35),
            sequence_points: s.heap(38),
        });
        $callback!($($args)*, local_scope, LocalScopeRaw {
            method: s.rid(36),
            import_scope: s.rid(37),
            variable_list: s.rid(38),
            constant_list: s.rid(39),
            start_offset: 0x10,
            length: 0x20,
        });
        $callback!($($args)*, local_variable, LocalVariableRaw {
            attributes: 0x0001,
            index: 3,
            name: s.heap(39),
        });
        $callback!($($args)*, local_constant, LocalConstantRaw {
            name: s.heap(40),
            signature: s.heap(41),
        });
        $callback!($($args)*, import_scope, ImportScopeRaw {
            parent: s.rid(40),
            imports: s.heap(42),
        });
        $callback!($($args)*, state_machine_method, StateMachineMethodRaw {
            move_next_method: s.rid(41),
            kickoff_method: s.rid(42),
        });
        $callback!($($args)*, custom_debug_information, CustomDebugInformationRaw {
            parent: s.coded(C::HasCustomDebugInformation, T::ImportScope, 43),
            kind: s.heap(43),
            value: s.heap(44),
        });
    }};
}

macro_rules! add_sample {
    ($tables:ident, $field:ident, $row:expr) => {
        $tables.$field.add_row($row);
    };
}

macro_rules! check_sample {
    ($check:ident, $context:expr, $field:ident, $row:expr) => {
        $check($context, &$row)?;
    };
}

/// A written stream together with the offset of every table region.
struct Written {
    stream: Vec<u8>,
    info: TableInfo,
    regions: Vec<(TableId, usize, usize)>,
}

impl Written {
    fn new(tables: &MetadataTables, stream: Vec<u8>) -> Result<Self> {
        let header = TablesHeader::parse(&stream)?;
        let info = header.table_info();

        let mut regions = Vec::new();
        let mut offset = header.rows_offset;
        for table in tables.tables() {
            let rows = header.row_count(table.table_id()) as usize;
            if rows == 0 {
                continue;
            }

            let size = rows * table.row_size(&info) as usize;
            regions.push((table.table_id(), offset, size));
            offset += size;
        }

        assert_eq!(header.rows.len(), regions.len());
        assert_eq!((offset + 3) & !3, stream.len());
        Ok(Written {
            stream,
            info,
            regions,
        })
    }

    fn region(&self, table: TableId) -> (usize, usize) {
        self.regions
            .iter()
            .find(|(id, _, _)| *id == table)
            .map(|(_, offset, size)| (*offset, *size))
            .unwrap_or_else(|| panic!("{table:?} missing from the stream"))
    }

    fn bytes(&self, table: TableId) -> &[u8] {
        let (offset, size) = self.region(table);
        &self.stream[offset..offset + size]
    }
}

fn read_back<R>(written: &Written, expected: &R) -> Result<()>
where
    R: RowReadable + RowWritable + PartialEq + std::fmt::Debug,
{
    let (offset, size) = written.region(R::TABLE);
    assert_eq!(size, R::row_size(&written.info) as usize, "{:?}", R::TABLE);

    let rows = read_rows::<R>(&written.stream, offset, 1, &written.info)?;
    assert_eq!(&rows[0], expected, "{:?}", R::TABLE);
    Ok(())
}

fn write_and_read_row<R>(info: &TableInfoRef, expected: &R) -> Result<()>
where
    R: RowReadable + RowWritable + PartialEq + std::fmt::Debug,
{
    let mut buffer = TableBuffer::new(info.clone());
    expected.row_write(&mut buffer)?;
    assert_eq!(buffer.len(), R::row_size(info) as usize, "{:?}", R::TABLE);

    let rows = read_rows::<R>(buffer.as_slice(), 0, 1, info)?;
    assert_eq!(&rows[0], expected, "{:?}", R::TABLE);
    Ok(())
}

fn full_table_set(samples: &Samples) -> MetadataTables {
    let mut tables = MetadataTables::new(samples.module());
    tables.set_assembly(samples.assembly());
    for_each_sample!(samples, add_sample!(tables));
    tables
}

fn stream_round_trip(samples: &Samples, heap_sizes: HeapSizes) -> Result<Written> {
    let mut tables = full_table_set(samples);
    let stream = tables.write(heap_sizes)?;
    let written = Written::new(&tables, stream)?;
    assert_eq!(written.info.heap_sizes(), heap_sizes);

    read_back(&written, &samples.module())?;
    read_back(&written, &samples.assembly())?;
    for_each_sample!(samples, check_sample!(read_back, &written));
    Ok(written)
}

#[test]
fn every_table_round_trips_with_small_columns() -> Result<()> {
    let samples = Samples { rid: 1, heap: 1 };
    let written = stream_round_trip(&samples, HeapSizes::empty())?;

    // 53 tables of one row each, all references 2 bytes wide
    assert_eq!(written.regions.len(), 53);
    assert_eq!(written.bytes(TableId::Field).len(), 6);
    Ok(())
}

#[test]
fn every_table_round_trips_with_large_heaps() -> Result<()> {
    let samples = Samples {
        rid: 1,
        heap: 0x1_0000,
    };
    let written = stream_round_trip(&samples, HeapSizes::all())?;
    assert_eq!(written.bytes(TableId::Field).len(), 2 + 4 + 4);
    assert_eq!(written.bytes(TableId::TypeRef).len(), 2 + 4 + 4);
    Ok(())
}

#[test]
fn every_table_round_trips_with_large_tables() -> Result<()> {
    let info: TableInfoRef = Arc::new(TableInfo::new(
        TableId::iter().map(|table| (table, 0x2_0000)),
        HeapSizes::all(),
    ));
    let samples = Samples {
        rid: 0x1_0000,
        heap: 0x1_0000,
    };

    write_and_read_row(&info, &samples.module())?;
    write_and_read_row(&info, &samples.assembly())?;
    for_each_sample!(&samples, check_sample!(write_and_read_row, &info));

    assert_eq!(TypeRefRaw::row_size(&info), 12);
    assert_eq!(MethodImplRaw::row_size(&info), 12);
    assert_eq!(LocalScopeRaw::row_size(&info), 24);
    Ok(())
}

enum Column {
    Short(u32),
    Long(u32),
}

fn row_bytes(columns: &[Column]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for column in columns {
        match column {
            Column::Short(value) => {
                bytes.extend_from_slice(&u16::try_from(*value).unwrap().to_le_bytes());
            }
            Column::Long(value) => bytes.extend_from_slice(&value.to_le_bytes()),
        }
    }
    bytes
}

#[test]
fn columns_are_written_in_declared_order() -> Result<()> {
    use Column::{Long, Short};
    use CodedIndexType as C;
    use TableId as T;

    let s = Samples { rid: 1, heap: 1 };
    let written = stream_round_trip(&s, HeapSizes::empty())?;
    let coded = |kind, table, k| s.coded(kind, table, k).encoded();

    let expected: Vec<(TableId, Vec<Column>)> = vec![
        (
            T::TypeRef,
            vec![
                Short(coded(C::ResolutionScope, T::AssemblyRef, 1)),
                Short(s.heap(1)),
                Short(s.heap(2)),
            ],
        ),
        (
            T::Event,
            vec![
                Short(0x0200),
                Short(s.heap(17)),
                Short(coded(C::TypeDefOrRef, T::TypeDef, 13)),
            ],
        ),
        (T::EventMap, vec![Short(s.rid(10)), Short(s.rid(11))]),
        (
            T::Property,
            vec![Short(0x1000), Short(s.heap(18)), Short(s.heap(19))],
        ),
        (T::PropertyMap, vec![Short(s.rid(14)), Short(s.rid(15))]),
        (
            T::MethodImpl,
            vec![
                Short(s.rid(19)),
                Short(coded(C::MethodDefOrRef, T::MethodDef, 20)),
                Short(coded(C::MethodDefOrRef, T::MemberRef, 21)),
            ],
        ),
        (
            T::MethodSpec,
            vec![
                Short(coded(C::MethodDefOrRef, T::MemberRef, 32)),
                Short(s.heap(33)),
            ],
        ),
        (T::FieldLayout, vec![Long(0x10), Short(s.rid(9))]),
        (
            T::GenericParamConstraint,
            vec![
                Short(s.rid(33)),
                Short(coded(C::TypeDefOrRef, T::TypeRef, 34)),
            ],
        ),
        (T::StandAloneSig, vec![Short(s.heap(16))]),
        (T::ParamPtr, vec![Short(s.rid(6))]),
        (T::EventPtr, vec![Short(s.rid(12))]),
        (T::PropertyPtr, vec![Short(s.rid(16))]),
        (T::EncMap, vec![Long(0x0600_0002)]),
        (T::AssemblyOS, vec![Long(2), Long(10), Long(1)]),
        (T::AssemblyProcessor, vec![Long(0x014C)]),
        (
            T::AssemblyRefProcessor,
            vec![Long(0x8664), Short(s.rid(25))],
        ),
        (
            T::MethodDebugInformation,
            vec![Short(s.rid(35)), Short(s.heap(38))],
        ),
        (
            T::LocalVariable,
            vec![Short(0x0001), Short(3), Short(s.heap(39))],
        ),
        (T::LocalConstant, vec![Short(s.heap(40)), Short(s.heap(41))]),
        (T::ImportScope, vec![Short(s.rid(40)), Short(s.heap(42))]),
        (
            T::MethodSemantics,
            vec![
                Short(0x0008),
                Short(s.rid(17)),
                Short(coded(C::HasSemantics, T::Event, 18)),
            ],
        ),
        (
            T::LocalScope,
            vec![
                Short(s.rid(36)),
                Short(s.rid(37)),
                Short(s.rid(38)),
                Short(s.rid(39)),
                Long(0x10),
                Long(0x20),
            ],
        ),
    ];

    for (table, columns) in expected {
        assert_eq!(written.bytes(table), row_bytes(&columns), "{table:?}");
    }
    Ok(())
}
