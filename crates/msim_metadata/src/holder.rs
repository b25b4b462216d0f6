//! `MetaModelHolder`: the full set of row collections produced by the
//! builder.

use crate::rows::*;

/// All relational metadata rows describing one compiled model.
#[derive(Debug, Clone, Default)]
pub struct MetaModelHolder {
    pub model_dic: Vec<ModelDicRow>,
    pub model_txt: Vec<ModelTxtRow>,
    pub type_dic: Vec<TypeDicRow>,
    pub type_txt: Vec<TypeTxtRow>,
    pub type_enum: Vec<TypeEnumRow>,
    pub type_enum_txt: Vec<TypeEnumTxtRow>,
    pub param_dic: Vec<ParamDicRow>,
    pub param_txt: Vec<ParamTxtRow>,
    pub param_dims: Vec<ParamDimsRow>,
    pub param_dims_txt: Vec<ParamDimsTxtRow>,
    pub table_dic: Vec<TableDicRow>,
    pub table_txt: Vec<TableTxtRow>,
    pub table_dims: Vec<TableDimsRow>,
    pub table_dims_txt: Vec<TableDimsTxtRow>,
    pub table_acc: Vec<TableAccRow>,
    pub table_acc_txt: Vec<TableAccTxtRow>,
    pub table_expr: Vec<TableExprRow>,
    pub table_expr_txt: Vec<TableExprTxtRow>,
    pub entity_dic: Vec<EntityDicRow>,
    pub entity_attr: Vec<EntityAttrRow>,
    pub entity_group_lst: Vec<EntityGroupLstRow>,
    pub entity_group_pc: Vec<EntityGroupPcRow>,
    pub entity_group_txt: Vec<EntityGroupTxtRow>,
    pub group_lst: Vec<GroupLstRow>,
    pub group_pc: Vec<GroupPcRow>,
    pub group_txt: Vec<GroupTxtRow>,
    pub param_import: Vec<ParamImportRow>,
    pub lang_lst: Vec<LangLstRow>,
    pub lang_word: Vec<LangWordRow>,
}
