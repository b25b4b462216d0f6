//! The symbol-table → metadata-row transformation.

use crate::digest::{combine, digest_hex};
use crate::holder::MetaModelHolder;
use crate::rows::*;
use msim_base::Atom;
use msim_symbols::{EnumerationVariant, ParameterSource, SymbolTable};

/// Identifying facts about the model itself, supplied by the caller (the
/// CLI driver reads these from its invocation flags and project files —
/// out of this crate's scope).
pub struct ModelInfo<'a> {
    pub name: &'a str,
    pub model_type: i32,
    pub version: &'a str,
    pub timestamp: &'a str,
    pub default_lang_id: i32,
}

/// Builds the full [`MetaModelHolder`] from a resolved `table`.
pub fn build(table: &SymbolTable, info: &ModelInfo) -> MetaModelHolder {
    let mut holder = MetaModelHolder::default();
    let mut type_digests = Vec::new();
    let mut param_digests = Vec::new();
    let mut table_digests = Vec::new();

    build_languages(table, &mut holder);
    build_types(table, &mut holder, &mut type_digests);
    build_parameters(table, &mut holder, &mut param_digests);
    build_tables(table, &mut holder, &mut table_digests);
    build_entities(table, &mut holder);
    build_groups(table, &mut holder);
    build_entity_groups(table, &mut holder);

    let mut all_digests = type_digests;
    all_digests.extend(param_digests);
    all_digests.extend(table_digests);
    let model_digest = combine(&all_digests);

    holder.model_dic.push(ModelDicRow {
        name: info.name.to_string(),
        model_type: info.model_type,
        version: info.version.to_string(),
        timestamp: info.timestamp.to_string(),
        default_lang_id: info.default_lang_id,
        digest: model_digest,
    });

    holder
}

fn lang_code(table: &SymbolTable, lang: Atom) -> String {
    if lang == Atom::EMPTY {
        "default".to_string()
    } else {
        table.interner().resolve(lang).to_string()
    }
}

fn build_languages(table: &SymbolTable, holder: &mut MetaModelHolder) {
    for (i, &lang_id) in table.collections.all_languages.iter().enumerate() {
        holder.lang_lst.push(LangLstRow {
            lang_id: i as u32,
            code: table.unique_name(lang_id).to_string(),
        });
    }
}

fn build_types(table: &SymbolTable, holder: &mut MetaModelHolder, digests: &mut Vec<String>) {
    for (i, &type_id) in table.collections.all_enumerations.iter().enumerate() {
        let Some(data) = table.get(type_id).as_enumeration() else {
            continue;
        };
        if !data.metadata_needed {
            continue;
        }
        let name = table.unique_name(type_id).to_string();
        let tid = i as u32;

        holder.type_dic.push(TypeDicRow {
            type_id: tid,
            name: name.clone(),
            dic_id: data.dic_id,
        });
        for (lang, entry) in &table.get(type_id).labels {
            holder.type_txt.push(TypeTxtRow {
                type_id: tid,
                lang: lang_code(table, *lang),
                descr: entry.text.clone(),
            });
        }

        let enumerator_names: Vec<String> = match &data.variant {
            EnumerationVariant::Range { lo, hi, .. } => {
                (*lo..=*hi).map(|v| v.to_string()).collect()
            }
            other => other
                .enumerators()
                .iter()
                .map(|&e| {
                    table
                        .unique_name(e)
                        .rsplit('.')
                        .next()
                        .unwrap_or_default()
                        .to_string()
                })
                .collect(),
        };
        for (ordinal, ename) in enumerator_names.iter().enumerate() {
            holder.type_enum.push(TypeEnumRow {
                type_id: tid,
                enum_id: ordinal as u32,
                name: ename.clone(),
            });
        }

        digests.push(digest_hex(&(&name, &enumerator_names)));
    }
}

fn build_parameters(table: &SymbolTable, holder: &mut MetaModelHolder, digests: &mut Vec<String>) {
    for (i, &param_id) in table.collections.all_parameters.iter().enumerate() {
        let Some(data) = table.get(param_id).as_parameter() else {
            continue;
        };
        if !matches!(data.source, ParameterSource::Scenario | ParameterSource::Derived) {
            continue;
        }
        let name = table.unique_name(param_id).to_string();
        let pid = i as u32;

        holder.param_dic.push(ParamDicRow {
            param_id: pid,
            name: name.clone(),
            rank: data.rank() as u32,
            type_id: 0,
            is_hidden: data.hidden,
        });

        for (dim_idx, &dim) in data.dimensions.iter().enumerate() {
            holder.param_dims.push(ParamDimsRow {
                param_id: pid,
                dim_id: dim_idx as u32,
                type_id: table
                    .collections
                    .all_enumerations
                    .iter()
                    .position(|&e| e == dim)
                    .unwrap_or(0) as u32,
            });
        }

        digests.push(digest_hex(&(&name, data.rank(), &data.dimension_sizes)));
    }
}

fn build_tables(table: &SymbolTable, holder: &mut MetaModelHolder, digests: &mut Vec<String>) {
    for (i, &table_id) in table.collections.all_tables.iter().enumerate() {
        let Some(data) = table.get(table_id).as_table() else {
            continue;
        };
        let name = table.unique_name(table_id).to_string();
        let tid = i as u32;

        holder.table_dic.push(TableDicRow {
            table_id: tid,
            name: name.clone(),
            rank: data.rank() as u32,
            is_internal: data.is_internal,
        });

        for (dim_idx, &dim) in data.dimensions.iter().enumerate() {
            holder.table_dims.push(TableDimsRow {
                table_id: tid,
                dim_id: dim_idx as u32,
                type_id: table
                    .collections
                    .all_enumerations
                    .iter()
                    .position(|&e| e == dim)
                    .unwrap_or(0) as u32,
            });
        }
        for acc in &data.accumulators {
            holder.table_acc.push(TableAccRow {
                table_id: tid,
                acc_id: acc.index,
                name: acc.name.clone(),
            });
        }
        for measure in &data.measures {
            holder.table_expr.push(TableExprRow {
                table_id: tid,
                expr_id: measure.index,
                name: measure.name.clone(),
            });
        }

        let measure_names: Vec<&str> = data.measures.iter().map(|m| m.name.as_str()).collect();
        digests.push(digest_hex(&(&name, data.rank(), &measure_names)));
    }
}

fn build_entities(table: &SymbolTable, holder: &mut MetaModelHolder) {
    for (i, &entity_id) in table.collections.all_entities.iter().enumerate() {
        let name = table.unique_name(entity_id).to_string();
        let eid = i as u32;
        holder.entity_dic.push(EntityDicRow {
            entity_id: eid,
            name,
        });
        if let Some(data) = table.get(entity_id).as_entity() {
            for (j, &member) in data.members.iter().enumerate() {
                holder.entity_attr.push(EntityAttrRow {
                    entity_id: eid,
                    attr_id: j as u32,
                    name: table.unique_name(member).to_string(),
                });
            }
        }
    }
}

fn build_groups(table: &SymbolTable, holder: &mut MetaModelHolder) {
    let mut push_group = |group_id: msim_symbols::SymbolId, is_param_group: bool, gid: u32| {
        let name = table.unique_name(group_id).to_string();
        holder.group_lst.push(GroupLstRow {
            group_id: gid,
            name,
            is_parameter_group: is_param_group,
        });
        if let Some(g) = table.get(group_id).as_group() {
            for (pos, &member) in g.members.iter().enumerate() {
                let is_group = table.get(member).kind.is_group();
                holder.group_pc.push(GroupPcRow {
                    group_id: gid,
                    child_pos: pos as u32,
                    child_group_id: if is_group {
                        table
                            .collections
                            .all_parameter_groups
                            .iter()
                            .chain(table.collections.all_table_groups.iter())
                            .position(|&m| m == member)
                            .map(|p| p as u32)
                    } else {
                        None
                    },
                    child_leaf_id: if is_group { None } else { Some(0) },
                });
            }
        }
    };

    for (i, &g) in table.collections.all_parameter_groups.iter().enumerate() {
        push_group(g, true, i as u32);
    }
    let offset = table.collections.all_parameter_groups.len() as u32;
    for (i, &g) in table.collections.all_table_groups.iter().enumerate() {
        push_group(g, false, offset + i as u32);
    }
}

/// `entity_group_lst`/`entity_group_pc`: groups of an entity's own
/// attributes, a separate row family from `group_lst`/`group_pc` (which
/// cover parameter and table groups) since membership is scoped to one
/// entity's attribute list rather than the model-wide symbol space.
fn build_entity_groups(table: &SymbolTable, holder: &mut MetaModelHolder) {
    for (i, &group_id) in table.collections.all_attribute_groups.iter().enumerate() {
        let Some(group) = table.get(group_id).as_group() else {
            continue;
        };
        let Some(&first_member) = group.members.first() else {
            continue;
        };
        let Some(owner) = table.get(first_member).as_member().map(|m| m.owner) else {
            continue;
        };
        let Some(entity_id) = table
            .collections
            .all_entities
            .iter()
            .position(|&e| e == owner)
        else {
            continue;
        };
        let entity_members = table
            .get(owner)
            .as_entity()
            .map(|e| e.members.clone())
            .unwrap_or_default();

        let gid = i as u32;
        holder.entity_group_lst.push(EntityGroupLstRow {
            entity_id: entity_id as u32,
            group_id: gid,
            name: table.unique_name(group_id).to_string(),
        });

        for (pos, &member) in group.members.iter().enumerate() {
            let Some(attr_id) = entity_members.iter().position(|&m| m == member) else {
                continue;
            };
            holder.entity_group_pc.push(EntityGroupPcRow {
                entity_id: entity_id as u32,
                group_id: gid,
                child_pos: pos as u32,
                attr_id: attr_id as u32,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msim_base::{Diagnostics, Location};
    use msim_symbols::{
        EnumerationData, EnumerationKind, EnumeratorData, ParameterData, Payload, SymbolKind,
        TypeRef,
    };

    fn info() -> ModelInfo<'static> {
        ModelInfo {
            name: "M",
            model_type: 0,
            version: "1.0",
            timestamp: "t",
            default_lang_id: 0,
        }
    }

    #[test]
    fn scenario_minimal_enumeration_and_parameter() {
        let mut table = SymbolTable::new();
        let mut d = Diagnostics::new();

        let sex = table.get_or_create("Sex", Location::synthetic());
        table.morph(sex, SymbolKind::Enumeration(EnumerationKind::Classification), &mut d);
        let m = table.get_or_create("Sex.M", Location::synthetic());
        table.morph(m, SymbolKind::Enumerator, &mut d);
        table.get_mut(m).payload = Payload::Enumerator(EnumeratorData { parent: sex, ordinal: 0 });
        let f = table.get_or_create("Sex.F", Location::synthetic());
        table.morph(f, SymbolKind::Enumerator, &mut d);
        table.get_mut(f).payload = Payload::Enumerator(EnumeratorData { parent: sex, ordinal: 1 });
        table.get_mut(sex).payload = Payload::Enumeration(EnumerationData {
            type_id: 0,
            dic_id: 0,
            metadata_needed: true,
            variant: EnumerationVariant::Classification {
                enumerators: vec![m, f],
            },
        });
        table.collections.all_enumerations.push(sex);

        let mortality = table.get_or_create("mortality", Location::synthetic());
        table.morph(mortality, SymbolKind::Parameter, &mut d);
        table.get_mut(mortality).payload = Payload::Parameter(ParameterData {
            source: ParameterSource::Scenario,
            datatype: TypeRef::Fundamental(msim_symbols::FundamentalType::Double),
            dimensions: vec![sex],
            dimension_sizes: vec![2],
            cumrate_trailing_dims: None,
            haz1rate: false,
            hidden: false,
            initializer: Vec::new(),
            sub_value_count: 1,
            value_notes: Default::default(),
        });
        table.collections.all_parameters.push(mortality);

        let holder = build(&table, &info());
        assert_eq!(holder.type_dic.len(), 1);
        assert_eq!(holder.type_enum.len(), 2);
        assert_eq!(holder.type_enum[0].name, "M");
        assert_eq!(holder.type_enum[1].name, "F");
        assert_eq!(holder.param_dic.len(), 1);
        assert_eq!(holder.param_dic[0].rank, 1);
        assert_eq!(holder.param_dims.len(), 1);
    }

    #[test]
    fn digest_is_stable_across_builds() {
        let mut table = SymbolTable::new();
        let mut d = Diagnostics::new();
        let sex = table.get_or_create("Sex", Location::synthetic());
        table.morph(sex, SymbolKind::Enumeration(EnumerationKind::BoolEnum), &mut d);
        table.get_mut(sex).payload = Payload::Enumeration(EnumerationData {
            type_id: 0,
            dic_id: 0,
            metadata_needed: true,
            variant: EnumerationVariant::BoolEnum {
                enumerators: Vec::new(),
            },
        });
        table.collections.all_enumerations.push(sex);

        let a = build(&table, &info());
        let b = build(&table, &info());
        assert_eq!(a.model_dic[0].digest, b.model_dic[0].digest);
    }

    #[test]
    fn entity_group_rows_reference_entity_attr_positions() {
        use msim_symbols::{DataMemberKind, EntityData, MemberData};

        let mut table = SymbolTable::new();
        let mut d = Diagnostics::new();

        let person = table.get_or_create("Person", Location::synthetic());
        table.morph(person, SymbolKind::Entity, &mut d);

        let age = table.get_or_create("age", Location::synthetic());
        table.morph(age, SymbolKind::EntityDataMember(DataMemberKind::SimpleAttribute), &mut d);
        table.get_mut(age).payload =
            Payload::EntityDataMember(MemberData::new(DataMemberKind::SimpleAttribute, person, 0));

        let sex = table.get_or_create("sex", Location::synthetic());
        table.morph(sex, SymbolKind::EntityDataMember(DataMemberKind::SimpleAttribute), &mut d);
        table.get_mut(sex).payload =
            Payload::EntityDataMember(MemberData::new(DataMemberKind::SimpleAttribute, person, 1));

        table.get_mut(person).payload = Payload::Entity(EntityData {
            members: vec![age, sex],
        });
        table.collections.all_entities.push(person);

        let demographics = table.get_or_create("Demographics", Location::synthetic());
        table.morph(demographics, SymbolKind::AttributeGroup, &mut d);
        table.get_mut(demographics).payload = Payload::Group(msim_symbols::GroupData {
            members: vec![age, sex],
        });
        table.collections.all_attribute_groups.push(demographics);

        let holder = build(&table, &info());

        assert_eq!(holder.entity_group_lst.len(), 1);
        assert_eq!(holder.entity_group_lst[0].entity_id, 0);
        assert_eq!(holder.entity_group_lst[0].name, "Demographics");
        assert_eq!(holder.entity_group_pc.len(), 2);
        assert_eq!(holder.entity_group_pc[0].attr_id, 0);
        assert_eq!(holder.entity_group_pc[1].attr_id, 1);
    }
}
