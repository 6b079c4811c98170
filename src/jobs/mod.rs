pub mod enrolment_expiry;
