use serde::{Deserialize, Serialize};

pub type DepartmentId = i64;
pub type EmployeeId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    // The backend model spells this column "desctiption".
    #[serde(default, alias = "desctiption")]
    pub description: String,
    #[serde(default)]
    pub manager: Option<EmployeeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub department: Option<DepartmentId>,
}

/// A reference to an employee that the backend may send either as a bare id
/// or as an embedded employee object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmployeeRef {
    Unresolved(EmployeeId),
    Resolved(Employee),
}

impl EmployeeRef {
    pub fn id(&self) -> EmployeeId {
        match self {
            EmployeeRef::Unresolved(id) => *id,
            EmployeeRef::Resolved(employee) => employee.id,
        }
    }

    /// Joins an unresolved reference against a loaded employee list by id.
    /// Already resolved references and unknown ids are returned unchanged.
    pub fn resolve(&self, employees: &[Employee]) -> EmployeeRef {
        match self {
            EmployeeRef::Unresolved(id) => employees
                .iter()
                .find(|employee| employee.id == *id)
                .cloned()
                .map(EmployeeRef::Resolved)
                .unwrap_or(EmployeeRef::Unresolved(*id)),
            EmployeeRef::Resolved(_) => self.clone(),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            EmployeeRef::Unresolved(id) => format!("Employee #{}", id),
            EmployeeRef::Resolved(employee) => employee.name.clone(),
        }
    }
}

impl Department {
    pub fn manager_name(&self, employees: &[Employee]) -> Option<String> {
        let manager = EmployeeRef::Unresolved(self.manager?);
        Some(manager.resolve(employees).display_name())
    }
}
