//! The closed set of symbol kinds.
//!
//! `SymbolKind` is a tagged sum, not a C++-style inheritance tree: every declared named thing in the DSL is one variant of
//! this enum, dispatched on with `match` rather than virtual calls. A few
//! variants carry a nested sub-kind (enumerations come in four flavors,
//! entity data members in many more) because the post-parse passes need to
//! distinguish them but downstream code (groups, cross-reference sets) only
//! cares that they are, say, "an enumeration".

/// The four value-space flavors an enumeration can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumerationKind {
    Classification,
    Range,
    Partition,
    BoolEnum,
}

/// Whether a table is populated by the simulation's accumulators or by
/// developer-supplied post-simulation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Entity,
    Derived,
}

/// The statement kind an `AnonGroup` materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnonGroupKind {
    Hide,
    ParametersSuppress,
    ParametersRetain,
    TablesSuppress,
    TablesRetain,
    ParametersToTables,
}

/// The many flavors of entity data member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataMemberKind {
    BuiltinAttribute,
    SimpleAttribute,
    IdentityAttribute,
    DerivedAttribute,
    LinkAttribute,
    MultilinkAggregateAttribute,
    Event,
    Increment,
    Multilink,
    Array,
    Foreign,
    Internal,
}

/// The closed discriminator of every `Symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A placeholder created by `get_or_create` before its declaration has
    /// been recognized. Never appears in the post-`eCreateMissingSymbols`
    /// population.
    Base,
    Language,
    Enumeration(EnumerationKind),
    Enumerator,
    Aggregation,
    Parameter,
    ParameterGroup,
    Table(TableKind),
    TableGroup,
    AnonGroup(AnonGroupKind),
    HideGroup,
    Dependency,
    Import,
    Entity,
    EntityDataMember(DataMemberKind),
    EntitySet,
    AttributeGroup,
    GlobalFunc,
    EntityFunc,
    Module,
    Scenario,
    Version,
    Model,
    ModelType,
    Dimension,
    MeasureDimension,
    TableMeasure,
    TableAccumulator,
}

impl SymbolKind {
    /// `true` for the placeholder kind created on first reference.
    pub fn is_base(self) -> bool {
        matches!(self, SymbolKind::Base)
    }

    /// A short, stable tag used in diagnostics (`"parameter"`, `"table"`, …).
    pub fn tag(self) -> &'static str {
        match self {
            SymbolKind::Base => "symbol",
            SymbolKind::Language => "language",
            SymbolKind::Enumeration(EnumerationKind::Classification) => "classification",
            SymbolKind::Enumeration(EnumerationKind::Range) => "range",
            SymbolKind::Enumeration(EnumerationKind::Partition) => "partition",
            SymbolKind::Enumeration(EnumerationKind::BoolEnum) => "bool",
            SymbolKind::Enumerator => "enumerator",
            SymbolKind::Aggregation => "aggregation",
            SymbolKind::Parameter => "parameter",
            SymbolKind::ParameterGroup => "parameter_group",
            SymbolKind::Table(TableKind::Entity) => "table",
            SymbolKind::Table(TableKind::Derived) => "derived_table",
            SymbolKind::TableGroup => "table_group",
            SymbolKind::AnonGroup(_) => "anon_group",
            SymbolKind::HideGroup => "hide_group",
            SymbolKind::Dependency => "dependency",
            SymbolKind::Import => "import",
            SymbolKind::Entity => "entity",
            SymbolKind::EntityDataMember(_) => "data_member",
            SymbolKind::EntitySet => "entity_set",
            SymbolKind::AttributeGroup => "attribute_group",
            SymbolKind::GlobalFunc => "global_func",
            SymbolKind::EntityFunc => "entity_func",
            SymbolKind::Module => "module",
            SymbolKind::Scenario => "scenario",
            SymbolKind::Version => "version",
            SymbolKind::Model => "model",
            SymbolKind::ModelType => "model_type",
            SymbolKind::Dimension => "dimension",
            SymbolKind::MeasureDimension => "measure_dimension",
            SymbolKind::TableMeasure => "table_measure",
            SymbolKind::TableAccumulator => "table_accumulator",
        }
    }

    pub fn is_enumeration(self) -> bool {
        matches!(self, SymbolKind::Enumeration(_))
    }

    pub fn is_table(self) -> bool {
        matches!(self, SymbolKind::Table(_))
    }

    pub fn is_group(self) -> bool {
        matches!(
            self,
            SymbolKind::ParameterGroup
                | SymbolKind::TableGroup
                | SymbolKind::AttributeGroup
                | SymbolKind::AnonGroup(_)
                | SymbolKind::HideGroup
                | SymbolKind::Dependency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_kind_is_recognized() {
        assert!(SymbolKind::Base.is_base());
        assert!(!SymbolKind::Entity.is_base());
    }

    #[test]
    fn enumeration_kinds_report_is_enumeration() {
        assert!(SymbolKind::Enumeration(EnumerationKind::Range).is_enumeration());
        assert!(!SymbolKind::Parameter.is_enumeration());
    }

    #[test]
    fn table_kinds_report_is_table() {
        assert!(SymbolKind::Table(TableKind::Derived).is_table());
        assert!(!SymbolKind::TableGroup.is_table());
    }

    #[test]
    fn group_kinds_are_classified() {
        assert!(SymbolKind::ParameterGroup.is_group());
        assert!(SymbolKind::AnonGroup(AnonGroupKind::Hide).is_group());
        assert!(!SymbolKind::Entity.is_group());
    }

    #[test]
    fn tags_are_stable_strings() {
        assert_eq!(SymbolKind::Parameter.tag(), "parameter");
        assert_eq!(SymbolKind::Table(TableKind::Entity).tag(), "table");
    }
}
