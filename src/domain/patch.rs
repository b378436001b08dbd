// ==========================================
// Pentwheel 跟踪服务 - 局部更新辅助
// ==========================================
// 可空列在 Patch 中使用 Option<Option<T>>:
// - 字段缺省      => None           (不修改)
// - 字段为 null   => Some(None)     (清空)
// - 字段有值      => Some(Some(v))  (赋值)
// ==========================================

use serde::{Deserialize, Deserializer};

/// 将出现的字段(包括 null)包装为 Some
///
/// 与 `#[serde(default)]` 搭配使用，缺省字段保持 None
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
