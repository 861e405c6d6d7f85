//! Built-in portal variable catalog.
//!
//! These are the variables the portal backend guarantees to supply when a
//! stored template is dispatched. Editing this list changes the catalog
//! shown to template authors; the names themselves are part of the
//! contract with the dispatcher and must stay in sync with it.

use super::{VariableCategory, VariableDescriptor};

fn var(name: &str, description: &str, example: &str) -> VariableDescriptor {
    VariableDescriptor::new(name, description, example)
}

/// The standard portal categories, in display order.
pub fn categories() -> Vec<VariableCategory> {
    vec![
        VariableCategory {
            name: "Student Information".to_string(),
            variables: vec![
                var(
                    "student.first_name",
                    "Student's first name",
                    "Adaeze",
                ),
                var(
                    "student.full_name",
                    "Student's full name as registered",
                    "Adaeze Chinwe Okafor",
                ),
                var(
                    "student.matric_number",
                    "Matriculation number",
                    "AFUED/2021/00451",
                ),
                var("student.email", "Institutional email address", "a.okafor@afued.edu.ng"),
                var("student.level", "Current level of study", "300"),
                var(
                    "student.department",
                    "Department of study",
                    "Computer Science Education",
                ),
            ],
        },
        VariableCategory {
            name: "Academic Session".to_string(),
            variables: vec![
                var("session.name", "Academic session label", "2024/2025"),
                var("session.semester", "Current semester", "First Semester"),
                var(
                    "session.start_date",
                    "Date the semester opens",
                    "2024-10-07",
                ),
            ],
        },
        VariableCategory {
            name: "Course Registration".to_string(),
            variables: vec![
                var(
                    "registration.deadline",
                    "Last day of course registration",
                    "2024-11-15",
                ),
                var(
                    "registration.status",
                    "Student's registration status",
                    "Pending approval",
                ),
                var(
                    "registration.unit_count",
                    "Total units registered",
                    "21",
                ),
            ],
        },
        VariableCategory {
            name: "Payments".to_string(),
            variables: vec![
                var("payment.amount", "Outstanding amount in naira", "45000"),
                var("payment.due_date", "Payment deadline", "2024-11-30"),
                var(
                    "payment.description",
                    "What the charge covers",
                    "Second semester tuition",
                ),
                var("payment.reference", "Payment reference code", "AFUED-PAY-88213"),
            ],
        },
        VariableCategory {
            name: "Portal".to_string(),
            variables: vec![
                var("portal.url", "Link to the student portal", "https://portal.afued.edu.ng"),
                var(
                    "portal.support_email",
                    "Helpdesk contact address",
                    "support@afued.edu.ng",
                ),
            ],
        },
    ]
}
