use std::error::Error;
use std::sync::{Arc, Mutex};

use taskboard::db;

const DB_PATH: &str = "taskboard.db";

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let connection = db::open_db(DB_PATH)?;
    let connection = Arc::new(Mutex::new(connection));

    taskboard::rocket(connection).launch().await?;

    Ok(())
}
