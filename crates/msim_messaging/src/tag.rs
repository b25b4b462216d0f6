//! The closed message-tag enumeration.
//!
//! Every packed-row message carries a tag drawn from this set; the tag
//! selects which adapter (un)packs the payload. Mirrors `MsgTag` in the
//! original `msgCommon.h`, one variant per metadata row family.

/// A message tag, one-to-one with a metadata row family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    ModelDic,
    TypeDic,
    TypeEnum,
    ParamDic,
    ParamDims,
    TableDic,
    TableDims,
    TableAcc,
    TableExpr,
    EntityDic,
    EntityAttr,
    GroupLst,
    GroupPc,
    LangLst,
    LangWord,
}

impl RowKind {
    /// The integer tag value wire messages carry, stable across a
    /// compilation.
    pub fn tag_value(self) -> i32 {
        match self {
            RowKind::ModelDic => 0,
            RowKind::TypeDic => 1,
            RowKind::TypeEnum => 2,
            RowKind::ParamDic => 3,
            RowKind::ParamDims => 4,
            RowKind::TableDic => 5,
            RowKind::TableDims => 6,
            RowKind::TableAcc => 7,
            RowKind::TableExpr => 8,
            RowKind::EntityDic => 9,
            RowKind::EntityAttr => 10,
            RowKind::GroupLst => 11,
            RowKind::GroupPc => 12,
            RowKind::LangLst => 13,
            RowKind::LangWord => 14,
        }
    }
}
