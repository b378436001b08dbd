// ==========================================
// Pentwheel 跟踪服务 - 客户公司领域模型
// ==========================================
// 对齐: schema.sql companies 表
// ==========================================

use crate::domain::patch::deserialize_some;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Company - 客户公司
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建公司请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
}

/// 公司局部更新
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub contact_person: Option<Option<String>>,
}

impl Company {
    pub fn from_new(new: NewCompany, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            address: new.address,
            contact_person: new.contact_person,
            created_at: now,
            updated_at: now,
        }
    }

    /// 逐字段应用局部更新
    pub fn apply_patch(&mut self, patch: CompanyPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.address {
            self.address = v;
        }
        if let Some(v) = patch.contact_person {
            self.contact_person = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut company = Company::from_new(
            NewCompany {
                name: "TechCorp Inc.".to_string(),
                email: Some("ops@techcorp.test".to_string()),
                phone: Some("555-0100".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );

        let patch: CompanyPatch =
            serde_json::from_str(r#"{"phone": null, "contact_person": "Dana"}"#).unwrap();
        company.apply_patch(patch);

        assert_eq!(company.name, "TechCorp Inc.");
        assert_eq!(company.email.as_deref(), Some("ops@techcorp.test"));
        assert_eq!(company.phone, None);
        assert_eq!(company.contact_person.as_deref(), Some("Dana"));
    }
}
