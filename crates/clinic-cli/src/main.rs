//! Clinic record keeper interactive binary.

mod input;

use clinic_store::clinic_types::{Gender, Patient};
use clinic_store::{storage, ClinicError, ClinicSession, StateFiles};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the data directory.
const DATA_DIR_ENV: &str = "CLINIC_DATA_DIR";

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Get data directory from env or use the working directory
    let data_dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| ".".to_string());
    let files = StateFiles::in_dir(&data_dir);
    tracing::info!("Loading clinic state from: {}", data_dir);

    let (mut session, imported) = storage::load_state(&files);
    if imported > 0 {
        println!("INFO: Imported {imported} patient(s) from records.csv.");
        storage::save_state(&session, &files);
    }

    tracing::info!(
        "Loaded {} patients, {} appointments, {} triage entries",
        session.patient_count(),
        session.appointment_count(),
        session.triage_count()
    );

    loop {
        print_menu();
        let choice = match input::read_int::<u32>("Select: ") {
            Ok(choice) => choice,
            Err(err) => {
                println!("ERROR: {err}");
                continue;
            }
        };

        if choice == 0 {
            storage::save_state(&session, &files);
            println!("Goodbye.");
            return Ok(());
        }

        let outcome = match choice {
            1 => register_patient(&mut session, &files),
            2 => lookup_patient(&session),
            3 => add_visit(&mut session, &files),
            4 => show_history(&session),
            5 => admit_emergency(&mut session, &files),
            6 => treat_next(&mut session, &files),
            7 => schedule_appointment(&mut session, &files),
            8 => cancel_appointment(&mut session, &files),
            9 => reschedule_appointment(&mut session, &files),
            10 => list_appointments(&session),
            _ => {
                println!("Invalid option.");
                Ok(())
            }
        };

        if let Err(err) = outcome {
            println!("ERROR: {err}");
        }
    }
}

fn print_menu() {
    println!("\n=== Clinic Patient Records & Scheduling ===");
    println!("1) Register Patient");
    println!("2) Lookup Patient");
    println!("3) Add Visit Record");
    println!("4) Show Visit History");
    println!("5) Admit Emergency");
    println!("6) Treat Next Emergency");
    println!("7) Schedule Appointment");
    println!("8) Cancel Appointment");
    println!("9) Reschedule Appointment");
    println!("10) List All Appointments");
    println!("0) Exit");
}

/// Prompts for the remaining registration fields of a known-fresh id.
fn read_new_patient(patient_id: String) -> CliResult<Patient> {
    let name = input::read_nonempty("Name: ")?;
    let age = input::read_int::<u32>("Age: ")?;
    let gender_text = input::read_nonempty("Gender (M/F/O): ")?;
    let gender = Gender::parse(&gender_text).ok_or("gender must be one of M, F, O")?;
    let phone = input::read_nonempty("Phone: ")?;
    let notes = input::read_optional("Medical notes (optional): ")?;
    Ok(Patient::new(patient_id, name, age, gender, phone, notes))
}

fn register_patient(session: &mut ClinicSession, files: &StateFiles) -> CliResult<()> {
    let patient_id = input::read_nonempty("Patient ID (unique): ")?;
    if session.patient(&patient_id).is_some() {
        return Err(format!("patient already exists: {patient_id}").into());
    }

    let patient = read_new_patient(patient_id)?;
    let shown = patient.to_string();
    session.register_patient(patient)?;
    println!("OK: Registered: {shown}");
    storage::save_state(session, files);
    Ok(())
}

fn lookup_patient(session: &ClinicSession) -> CliResult<()> {
    let patient_id = input::read_nonempty("Patient ID: ")?;
    match session.patient(&patient_id) {
        Some(patient) => println!("FOUND: {patient}"),
        None => println!("NOT FOUND."),
    }
    Ok(())
}

fn add_visit(session: &mut ClinicSession, files: &StateFiles) -> CliResult<()> {
    let patient_id = input::read_nonempty("Patient ID: ")?;
    let entry = input::read_nonempty("Visit record text: ")?;
    session.add_visit(&patient_id, &entry)?;
    println!("OK: Visit added.");
    storage::save_state(session, files);
    Ok(())
}

fn show_history(session: &ClinicSession) -> CliResult<()> {
    let patient_id = input::read_nonempty("Patient ID: ")?;
    let history = session.visit_history(&patient_id)?;
    println!("\n--- Visit History ---");
    if history.is_empty() {
        println!("(no visits recorded)");
    } else {
        println!("{history}");
    }
    Ok(())
}

fn admit_emergency(session: &mut ClinicSession, files: &StateFiles) -> CliResult<()> {
    let patient_id = input::read_nonempty("Patient ID: ")?;
    if session.patient(&patient_id).is_none() {
        let answer = input::read_line("Patient not found. Register now? (Y/N): ")?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Canceled.");
            return Ok(());
        }
        let patient = read_new_patient(patient_id.clone())?;
        let shown = patient.to_string();
        session.register_patient(patient)?;
        println!("OK: Registered: {shown}");
        storage::save_state(session, files);
    }

    let severity = input::read_int::<u8>("Severity (1..10): ")?;
    let complaint = input::read_nonempty("Emergency complaint: ")?;
    session.admit_emergency(&patient_id, severity, &complaint)?;
    println!("OK: added to triage.");
    storage::save_state(session, files);
    Ok(())
}

fn treat_next(session: &mut ClinicSession, files: &StateFiles) -> CliResult<()> {
    match session.treat_next() {
        Some((_, payload)) => {
            println!("TREAT NOW -> {payload}");
            storage::save_state(session, files);
        }
        None => println!("No emergency patients in queue."),
    }
    Ok(())
}

fn schedule_appointment(session: &mut ClinicSession, files: &StateFiles) -> CliResult<()> {
    let patient_id = input::read_nonempty("Patient ID: ")?;
    let datetime = input::read_nonempty("Appointment Date (YYYY-MM-DD HH:MM): ")?;
    let (_, appt) = session.schedule_appointment(&patient_id, &datetime)?;
    println!("OK: scheduled: {appt}");
    println!("Appointment code: {}", appt.code);
    storage::save_state(session, files);
    Ok(())
}

fn cancel_appointment(session: &mut ClinicSession, files: &StateFiles) -> CliResult<()> {
    let code = input::read_nonempty("Appointment code (5 chars): ")?;
    match session.cancel_appointment(&code) {
        Ok(appt) => {
            println!("OK: canceled: {appt}");
            storage::save_state(session, files);
            Ok(())
        }
        Err(ClinicError::AppointmentNotFound { .. }) => {
            println!("NOT FOUND.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn reschedule_appointment(session: &mut ClinicSession, files: &StateFiles) -> CliResult<()> {
    let code = input::read_nonempty("Existing appointment code (5 chars): ")?;
    let datetime = input::read_nonempty("New DateTime (YYYY-MM-DD HH:MM): ")?;
    match session.reschedule_appointment(&code, &datetime) {
        Ok((_, appt)) => {
            println!("OK: rescheduled: {appt}");
            println!("Appointment code: {}", appt.code);
            storage::save_state(session, files);
            Ok(())
        }
        Err(ClinicError::AppointmentNotFound { .. }) => {
            println!("NOT FOUND.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn list_appointments(session: &ClinicSession) -> CliResult<()> {
    if session.appointment_count() == 0 {
        println!("(no appointments)");
        return Ok(());
    }

    println!("\n--- Appointments (Chronological) ---");
    for (_, appt) in session.appointments() {
        println!("CODE={}  {}", appt.code, appt);
    }
    Ok(())
}
