mod avatars;
mod faculty;
mod home;
mod students;

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn create_routes(state: AppState, request_timeout: Duration, max_upload_bytes: usize) -> Router {
    let student_routes = Router::new()
        .route("/student", get(students::list_students))
        .route("/student/add-student", post(students::create_student))
        .route("/student/by-age", get(students::students_by_age))
        .route("/student/by-name", get(students::students_by_name))
        .route("/student/names-starting-with", get(students::names_starting_with))
        .route("/student/count", get(students::count_students))
        .route("/student/average-age", get(students::average_age))
        .route("/student/last-five", get(students::last_five))
        .route("/student/{id}/find-student", get(students::find_student))
        .route("/student/{id}/edite", put(students::edit_student))
        .route("/student/{id}/delete-student", delete(students::delete_student))
        .route("/student/{id}/faculty-by-student", get(students::faculty_by_student))
        .route("/student/{id}/faculty/{faculty_id}", put(students::assign_faculty));

    let faculty_routes = Router::new()
        .route("/faculty", get(faculty::list_faculty))
        .route("/faculty/add-faculty", post(faculty::create_faculty))
        .route("/faculty/color", get(faculty::faculty_by_color))
        .route("/faculty/by-name", get(faculty::faculty_by_name))
        .route("/faculty/{id}/find-faculty", get(faculty::find_faculty))
        .route("/faculty/{id}/update", put(faculty::update_faculty))
        .route("/faculty/{id}/delete", delete(faculty::delete_faculty))
        .route("/faculty/{id}/students-faculty", get(faculty::students_of_faculty));

    let avatar_routes = Router::new()
        .route("/avatar", get(avatars::list_avatars))
        .route(
            "/avatar/{id}/avatar",
            post(avatars::upload_avatar).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/avatar/{id}/avatar-from-db", get(avatars::avatar_from_db))
        .route("/avatar/{id}/avatar-from-file", get(avatars::avatar_from_file));

    Router::new()
        .route("/", get(home::root))
        .route("/port", get(home::port))
        .merge(student_routes)
        .merge(faculty_routes)
        .merge(avatar_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
