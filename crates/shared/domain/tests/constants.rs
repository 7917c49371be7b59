use shub_domain::constants::{
    ADMIN, ALL_FEATURES, LECTURER, STUDENT, TUTOR, TUTOR_FEATURES, TUTOR_REQUESTS, TUTOR_SESSIONS,
    TUTOR_STUDENTS,
};

#[test]
fn constants_match_wire_strings() {
    assert_eq!(ADMIN, "admin");
    assert_eq!(LECTURER, "lecturer");
    assert_eq!(TUTOR, "tutor");
    assert_eq!(STUDENT, "student");
    assert_eq!(ALL_FEATURES, "all");
}

#[test]
fn tutor_features_are_the_fixed_three() {
    assert_eq!(TUTOR_FEATURES, [TUTOR_SESSIONS, TUTOR_REQUESTS, TUTOR_STUDENTS]);
    assert_eq!(TUTOR_SESSIONS, "tutor_sessions");
    assert_eq!(TUTOR_REQUESTS, "tutor_requests");
    assert_eq!(TUTOR_STUDENTS, "tutor_students");
}
