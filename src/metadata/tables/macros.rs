//! Declarative row definitions.
//!
//! Every metadata table row is a flat list of columns of a handful of kinds. The
//! [`metadata_row`] macro turns such a list into the row struct plus its
//! [`crate::metadata::tables::RowWritable`] and [`crate::metadata::tables::RowReadable`]
//! implementations, and for sorted tables a [`crate::metadata::tables::SortedRow`]
//! implementation comparing the listed key columns in order.
//!
//! Column kinds:
//!
//! | kind          | Rust type    | encoding                                   |
//! |---------------|--------------|--------------------------------------------|
//! | `u16`, `u32`  | same         | fixed width                                |
//! | `padded_u8`   | `u8`         | one byte followed by a zero padding byte   |
//! | `string`      | `u32`        | `#Strings` offset, 2 or 4 bytes            |
//! | `blob`        | `u32`        | `#Blob` offset, 2 or 4 bytes               |
//! | `guid`        | `u32`        | `#GUID` index, 2 or 4 bytes                |
//! | `rid(Table)`  | `u32`        | row id of `Table`, 2 or 4 bytes            |
//! | `coded(Kind)` | `CodedIndex` | coded index of `Kind`, 2 or 4 bytes        |

macro_rules! column_type {
    (u16) => { u16 };
    (u32) => { u32 };
    (padded_u8) => { u8 };
    (string) => { u32 };
    (blob) => { u32 };
    (guid) => { u32 };
    (rid $table:ident) => { u32 };
    (coded $kind:ident) => { $crate::metadata::tables::CodedIndex };
}

macro_rules! column_size {
    ($sizes:ident, u16) => { 2 };
    ($sizes:ident, u32) => { 4 };
    ($sizes:ident, padded_u8) => { 2 };
    ($sizes:ident, string) => { u32::from($sizes.str_bytes()) };
    ($sizes:ident, blob) => { u32::from($sizes.blob_bytes()) };
    ($sizes:ident, guid) => { u32::from($sizes.guid_bytes()) };
    ($sizes:ident, rid $table:ident) => {
        u32::from($sizes.table_index_bytes($crate::metadata::tables::TableId::$table))
    };
    ($sizes:ident, coded $kind:ident) => {
        u32::from($sizes.coded_index_bytes($crate::metadata::tables::CodedIndexType::$kind))
    };
}

macro_rules! column_write {
    ($buffer:ident, $value:expr, u16) => { $buffer.write_u16($value); };
    ($buffer:ident, $value:expr, u32) => { $buffer.write_u32($value); };
    ($buffer:ident, $value:expr, padded_u8) => {
        $buffer.write_u8($value);
        $buffer.write_u8(0);
    };
    ($buffer:ident, $value:expr, string) => { $buffer.write_string($value)?; };
    ($buffer:ident, $value:expr, blob) => { $buffer.write_blob($value)?; };
    ($buffer:ident, $value:expr, guid) => { $buffer.write_guid($value)?; };
    ($buffer:ident, $value:expr, rid $table:ident) => {
        $buffer.write_rid($crate::metadata::tables::TableId::$table, $value)?;
    };
    ($buffer:ident, $value:expr, coded $kind:ident) => {
        $buffer.write_coded($crate::metadata::tables::CodedIndexType::$kind, &$value)?;
    };
}

macro_rules! column_read {
    ($cursor:ident, u16) => { $cursor.read_u16()? };
    ($cursor:ident, u32) => { $cursor.read_u32()? };
    ($cursor:ident, padded_u8) => {{
        let value = $cursor.read_u8()?;
        $cursor.read_u8()?;
        value
    }};
    ($cursor:ident, string) => { $cursor.read_string()? };
    ($cursor:ident, blob) => { $cursor.read_blob()? };
    ($cursor:ident, guid) => { $cursor.read_guid()? };
    ($cursor:ident, rid $table:ident) => {
        $cursor.read_rid($crate::metadata::tables::TableId::$table)?
    };
    ($cursor:ident, coded $kind:ident) => {
        $cursor.read_coded($crate::metadata::tables::CodedIndexType::$kind)?
    };
}

/// Defines a metadata table row. See the module documentation for the column kinds.
///
/// ```text
/// metadata_row! {
///     /// Doc comment of the row
///     pub struct ConstantRaw => Constant, sorted_by(parent) {
///         /// Element type of the value
///         pub base: padded_u8,
///         pub parent: coded(HasConstant),
///         pub value: blob,
///     }
/// }
/// ```
macro_rules! metadata_row {
    (
        $(#[$meta:meta])*
        pub struct $name:ident => $table:ident $(, sorted_by($($key:ident),+))? {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $kind:ident $(($arg:ident))?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: column_type!($kind $($arg)?),
            )+
        }

        impl $crate::metadata::tables::RowWritable for $name {
            const TABLE: $crate::metadata::tables::TableId =
                $crate::metadata::tables::TableId::$table;

            fn row_size(sizes: &$crate::metadata::tables::TableInfo) -> u32 {
                0 $( + column_size!(sizes, $kind $($arg)?) )+
            }

            fn row_write(
                &self,
                buffer: &mut $crate::metadata::tables::TableBuffer,
            ) -> $crate::Result<()> {
                $( column_write!(buffer, self.$field, $kind $($arg)?); )+
                Ok(())
            }
        }

        impl $crate::metadata::tables::RowReadable for $name {
            fn row_read(
                cursor: &mut $crate::metadata::tables::TableCursor<'_>,
            ) -> $crate::Result<Self> {
                Ok($name {
                    $( $field: column_read!(cursor, $kind $($arg)?), )+
                })
            }
        }

        $(
            impl $crate::metadata::tables::SortedRow for $name {
                fn compare(&self, other: &Self) -> std::cmp::Ordering {
                    std::cmp::Ordering::Equal
                        $( .then_with(|| self.$key.cmp(&other.$key)) )+
                }
            }
        )?
    };
}
