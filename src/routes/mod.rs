pub mod access_code_routes;
pub mod hobby_routes;
