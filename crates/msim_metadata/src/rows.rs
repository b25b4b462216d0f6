//! Row families of the relational metadata schema.
//!
//! Every row is a plain serializable struct mirroring one table of the
//! downstream relational schema. `*Txt` rows carry the per-language text
//! (labels/notes) a `*Dic`/`*Dims`/`*Acc`/`*Expr` row's id refers to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDicRow {
    pub name: String,
    pub model_type: i32,
    pub version: String,
    pub timestamp: String,
    pub default_lang_id: i32,
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTxtRow {
    pub lang: String,
    pub descr: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDicRow {
    pub type_id: u32,
    pub name: String,
    pub dic_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeTxtRow {
    pub type_id: u32,
    pub lang: String,
    pub descr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeEnumRow {
    pub type_id: u32,
    pub enum_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeEnumTxtRow {
    pub type_id: u32,
    pub enum_id: u32,
    pub lang: String,
    pub descr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDicRow {
    pub param_id: u32,
    pub name: String,
    pub rank: u32,
    pub type_id: u32,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamTxtRow {
    pub param_id: u32,
    pub lang: String,
    pub descr: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDimsRow {
    pub param_id: u32,
    pub dim_id: u32,
    pub type_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDimsTxtRow {
    pub param_id: u32,
    pub dim_id: u32,
    pub lang: String,
    pub descr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDicRow {
    pub table_id: u32,
    pub name: String,
    pub rank: u32,
    pub is_internal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableTxtRow {
    pub table_id: u32,
    pub lang: String,
    pub descr: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDimsRow {
    pub table_id: u32,
    pub dim_id: u32,
    pub type_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDimsTxtRow {
    pub table_id: u32,
    pub dim_id: u32,
    pub lang: String,
    pub descr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableAccRow {
    pub table_id: u32,
    pub acc_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableAccTxtRow {
    pub table_id: u32,
    pub acc_id: u32,
    pub lang: String,
    pub descr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableExprRow {
    pub table_id: u32,
    pub expr_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableExprTxtRow {
    pub table_id: u32,
    pub expr_id: u32,
    pub lang: String,
    pub descr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDicRow {
    pub entity_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAttrRow {
    pub entity_id: u32,
    pub attr_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupLstRow {
    pub group_id: u32,
    pub name: String,
    pub is_parameter_group: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPcRow {
    pub group_id: u32,
    pub child_pos: u32,
    pub child_group_id: Option<u32>,
    pub child_leaf_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTxtRow {
    pub group_id: u32,
    pub lang: String,
    pub descr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityGroupLstRow {
    pub entity_id: u32,
    pub group_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityGroupPcRow {
    pub entity_id: u32,
    pub group_id: u32,
    pub child_pos: u32,
    pub attr_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityGroupTxtRow {
    pub entity_id: u32,
    pub group_id: u32,
    pub lang: String,
    pub descr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamImportRow {
    pub param_id: u32,
    pub from_name: String,
    pub from_model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangLstRow {
    pub lang_id: u32,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangWordRow {
    pub lang_id: u32,
    pub code: String,
    pub value: String,
}
