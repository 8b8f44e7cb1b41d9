//! Events, properties, and the accessor methods bound to them.

use bitflags::bitflags;

bitflags! {
    /// Accessor roles of the MethodSemantics table, §II.23.1.12
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MethodSemanticsAttributes: u16 {
        /// Setter of a property
        const SETTER = 0x0001;
        /// Getter of a property
        const GETTER = 0x0002;
        /// Other accessor of a property or event
        const OTHER = 0x0004;
        /// `add` accessor of an event
        const ADD_ON = 0x0008;
        /// `remove` accessor of an event
        const REMOVE_ON = 0x0010;
        /// `raise` accessor of an event
        const FIRE = 0x0020;
    }
}

metadata_row! {
    /// The EventMap table maps types to the start of their event run. `TableId` = 0x12
    pub struct EventMapRaw => EventMap {
        /// the owning type
        pub parent: rid(TypeDef),
        /// first row of the owned event run
        pub event_list: rid(Event),
    }
}

metadata_row! {
    /// The Event table defines events. `TableId` = 0x14
    pub struct EventRaw => Event {
        /// a 2-byte bitmask of type `EventAttributes`, §II.23.1.4
        pub flags: u16,
        /// an index into the String heap
        pub name: string,
        /// a `TypeDefOrRef` coded index of the delegate type
        pub event_type: coded(TypeDefOrRef),
    }
}

metadata_row! {
    /// The PropertyMap table maps types to the start of their property run. `TableId` = 0x15
    pub struct PropertyMapRaw => PropertyMap {
        /// the owning type
        pub parent: rid(TypeDef),
        /// first row of the owned property run
        pub property_list: rid(Property),
    }
}

metadata_row! {
    /// The Property table defines properties. `TableId` = 0x17
    pub struct PropertyRaw => Property {
        /// a 2-byte bitmask of type `PropertyAttributes`, §II.23.1.14
        pub flags: u16,
        /// an index into the String heap
        pub name: string,
        /// an index into the Blob heap, the property signature
        pub signature: blob,
    }
}

metadata_row! {
    /// The MethodSemantics table binds accessor methods to events and properties. `TableId` = 0x18
    ///
    /// Sorted by `association`.
    pub struct MethodSemanticsRaw => MethodSemantics, sorted_by(association) {
        /// a 2-byte bitmask of type [`MethodSemanticsAttributes`]
        pub semantics: u16,
        /// the accessor method
        pub method: rid(MethodDef),
        /// a `HasSemantics` coded index of the event or property
        pub association: coded(HasSemantics),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::tables::{
        read_rows, CodedIndex, CodedIndexType, RowWritable, SortedTable, TableBuffer, TableId,
        TableInfo, TableWrite,
    };

    fn association(table: TableId, row: u32) -> CodedIndex {
        CodedIndex::new(CodedIndexType::HasSemantics, table, row).unwrap()
    }

    #[test]
    fn crafted_short() {
        let data = vec![
            0x02, 0x00, // semantics
            0x03, 0x00, // method
            0x05, 0x00, // association, Property tag 1, row 2
        ];
        let sizes = TableInfo::default();

        let rows = read_rows::<MethodSemanticsRaw>(&data, 0, 1, &sizes).unwrap();
        assert_eq!(
            MethodSemanticsAttributes::from_bits_truncate(rows[0].semantics),
            MethodSemanticsAttributes::GETTER
        );
        assert_eq!(rows[0].method, 3);
        assert_eq!(rows[0].association, association(TableId::Property, 2));
    }

    #[test]
    fn sorted_by_encoded_association() {
        let mut table = SortedTable::new();
        // Property 1 encodes as 3, Event 2 as 4
        table.add_row(MethodSemanticsRaw {
            semantics: MethodSemanticsAttributes::ADD_ON.bits(),
            method: 1,
            association: association(TableId::Event, 2),
        });
        table.add_row(MethodSemanticsRaw {
            semantics: MethodSemanticsAttributes::GETTER.bits(),
            method: 2,
            association: association(TableId::Property, 1),
        });
        table.prepare();

        let mut buffer = TableBuffer::new(Arc::new(TableInfo::default()));
        table.write(&mut buffer).unwrap();
        assert_eq!(
            buffer.as_slice(),
            &[0x02, 0x00, 0x02, 0x00, 0x03, 0x00, 0x08, 0x00, 0x01, 0x00, 0x04, 0x00]
        );
        assert_eq!(MethodSemanticsRaw::row_size(buffer.info()), 6);
    }
}
