pub use super::enrolments::Entity as Enrolments;
