use crate::app::api::ProjectInput;
use crate::domain::AppError;

pub fn run_validate(input: ProjectInput) -> Result<(), AppError> {
    let outcome = crate::app::api::validate_at(&super::current_dir()?, &input)?;

    println!("✅ {} application(s) valid", outcome.apps.len());
    for app in &outcome.apps {
        println!("  • {} :{} → {}", app.name, app.listen_port, app.served_path);
    }
    Ok(())
}
