use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One employee document. Business fields are nullable because updates
/// write their input verbatim.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub role: Option<String>,
    pub salary: Option<f64>,
    pub terminated: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The four business fields as supplied by a caller on create or update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub terminated: Option<bool>,
}

impl EmployeeFields {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        salary: f64,
        terminated: bool,
    ) -> Self {
        Self {
            name: Some(name.into()),
            role: Some(role.into()),
            salary: Some(salary),
            terminated: Some(terminated),
        }
    }

    /// Build an active model for a fresh record under `id`.
    pub fn into_new_model(self, id: Uuid) -> ActiveModel {
        let mut model = ActiveModel {
            id: sea_orm::Set(id),
            ..Default::default()
        };
        self.apply_to(&mut model);
        model
    }

    /// Overwrite every business field of `model`, leaving the id untouched.
    pub fn apply_to(self, model: &mut ActiveModel) {
        model.name = sea_orm::Set(self.name);
        model.role = sea_orm::Set(self.role);
        model.salary = sea_orm::Set(self.salary);
        model.terminated = sea_orm::Set(self.terminated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_keys_deserialize_as_absent() {
        let fields: EmployeeFields = serde_json::from_value(json!({"name": "Ana"})).unwrap();
        assert_eq!(fields.name.as_deref(), Some("Ana"));
        assert!(fields.role.is_none());
        assert!(fields.salary.is_none());
        assert!(fields.terminated.is_none());
    }

    #[test]
    fn apply_replaces_all_business_fields() {
        let id = Uuid::new_v4();
        let mut model =
            EmployeeFields::new("Ana", "Engineer", 5000.0, false).into_new_model(id);
        EmployeeFields {
            role: Some("Lead".into()),
            ..Default::default()
        }
        .apply_to(&mut model);

        assert_eq!(model.id, sea_orm::Set(id));
        assert_eq!(model.name, sea_orm::Set(None));
        assert_eq!(model.role, sea_orm::Set(Some("Lead".to_string())));
        assert_eq!(model.salary, sea_orm::Set(None));
        assert_eq!(model.terminated, sea_orm::Set(None));
    }

    #[test]
    fn model_serializes_id_as_string() {
        let id = Uuid::new_v4();
        let model = Model {
            id,
            name: Some("Ana".into()),
            role: Some("Engineer".into()),
            salary: Some(5000.0),
            terminated: Some(false),
        };
        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["id"], json!(id.to_string()));
        assert_eq!(value["terminated"], json!(false));
    }
}
