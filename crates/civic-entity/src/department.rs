//! Static catalogue of the municipal departments reports are routed to.

use serde::Serialize;

use crate::report::ReportCategory;

/// A department responsible for one or more report categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    /// Stable department identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Categories this department handles.
    pub categories: &'static [ReportCategory],
}

static DEPARTMENTS: [Department; 4] = [
    Department {
        id: "dept_roads",
        name: "Municipal Roads Department",
        categories: &[ReportCategory::Roads],
    },
    Department {
        id: "dept_safety",
        name: "Public Safety Department",
        categories: &[ReportCategory::Safety],
    },
    Department {
        id: "dept_environment",
        name: "Environment & Parks Department",
        categories: &[ReportCategory::Environment],
    },
    Department {
        id: "dept_sanitation",
        name: "Health & Sanitation Department",
        categories: &[ReportCategory::Garbage],
    },
];

impl Department {
    /// Every department.
    pub fn all() -> &'static [Department] {
        &DEPARTMENTS
    }

    /// The department handling a category.
    pub fn for_category(category: ReportCategory) -> Option<&'static Department> {
        DEPARTMENTS.iter().find(|d| d.categories.contains(&category))
    }

    /// Look up a department by id.
    pub fn by_id(id: &str) -> Option<&'static Department> {
        DEPARTMENTS.iter().find(|d| d.id == id)
    }
}
