//! Workset construction.

use msim_symbols::{Constant, ParameterSource, SymbolId, SymbolTable};

/// One scenario parameter's entry in a workset.
#[derive(Debug, Clone)]
pub struct WorksetParamEntry {
    pub param_id: SymbolId,
    pub name: String,
    pub sub_value_count: u32,
    pub default_sub_value_id: u32,
    pub value_notes: Vec<(String, String)>,
    /// Each sub-value's initializer, obtained from the parameter. A non-sub-valued parameter has exactly one entry here.
    pub sub_values: Vec<Vec<Constant>>,
}

/// A named set of parameter values forming a scenario.
#[derive(Debug, Clone)]
pub struct Workset {
    pub name: String,
    pub entries: Vec<WorksetParamEntry>,
}

/// Builds the default workset: one entry per scenario parameter.
pub fn build_workset(table: &SymbolTable, name: &str) -> Workset {
    let mut entries = Vec::new();
    for &param_id in &table.collections.all_parameters {
        let Some(data) = table.get(param_id).as_parameter() else {
            continue;
        };
        if data.source != ParameterSource::Scenario {
            continue;
        }
        let value_notes = data
            .value_notes
            .iter()
            .map(|(lang, text)| (table.interner().resolve(*lang).to_string(), text.clone()))
            .collect();
        let sub_values = (0..data.sub_value_count.max(1))
            .map(|_| data.initializer.clone())
            .collect();
        entries.push(WorksetParamEntry {
            param_id,
            name: table.unique_name(param_id).to_string(),
            sub_value_count: data.sub_value_count,
            default_sub_value_id: 0,
            value_notes,
            sub_values,
        });
    }
    Workset {
        name: name.to_string(),
        entries,
    }
}
