pub mod api_error;
pub mod data;
pub mod db;
pub mod tasks;

use rocket::{routes, Build, Rocket};

use data::DBConnection;
use tasks::endpoints;

pub fn rocket(connection: DBConnection) -> Rocket<Build> {
    rocket::build().manage(connection).mount(
        "/api",
        routes![
            endpoints::get_tasks,
            endpoints::get_task,
            endpoints::add_task,
            endpoints::update_task,
            endpoints::delete_task,
        ],
    )
}
