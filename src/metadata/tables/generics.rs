//! Generic parameters and their constraints.

metadata_row! {
    /// The GenericParam table defines generic parameters of types and methods. `TableId` = 0x2A
    ///
    /// Sorted by `owner`, then by `number`.
    pub struct GenericParamRaw => GenericParam, sorted_by(owner, number) {
        /// a 2-byte position of the parameter, numbered from zero
        pub number: u16,
        /// a 2-byte bitmask of type `GenericParamAttributes`, §II.23.1.7
        pub flags: u16,
        /// a `TypeOrMethodDef` coded index of the owner
        pub owner: coded(TypeOrMethodDef),
        /// an index into the String heap
        pub name: string,
    }
}

metadata_row! {
    /// The GenericParamConstraint table lists the constraints of generic parameters. `TableId` = 0x2C
    ///
    /// Sorted by `owner`.
    pub struct GenericParamConstraintRaw => GenericParamConstraint, sorted_by(owner) {
        /// the constrained parameter
        pub owner: rid(GenericParam),
        /// a `TypeDefOrRef` coded index of the constraint type
        pub constraint: coded(TypeDefOrRef),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tables::{
        CodedIndex, CodedIndexType, SortedTable, TableId, TableWrite,
    };

    fn param(owner: TableId, owner_row: u32, number: u16) -> GenericParamRaw {
        GenericParamRaw {
            number,
            flags: 0,
            owner: CodedIndex::new(CodedIndexType::TypeOrMethodDef, owner, owner_row).unwrap(),
            name: 1,
        }
    }

    #[test]
    fn owner_then_number() {
        let mut table = SortedTable::new();
        table.add_row(param(TableId::MethodDef, 1, 1));
        table.add_row(param(TableId::TypeDef, 2, 0));
        table.add_row(param(TableId::MethodDef, 1, 0));
        table.add_row(param(TableId::TypeDef, 1, 0));
        table.prepare();

        // TypeDef 1 = 2, MethodDef 1 = 3, TypeDef 2 = 4
        let order: Vec<(u32, u16)> = table
            .iter()
            .map(|row| (row.owner.encoded(), row.number))
            .collect();
        assert_eq!(order, vec![(2, 0), (3, 0), (3, 1), (4, 0)]);
    }
}
