use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use hrms_lite::api::{ApiClient, AttendanceQuery, AttendanceStatus, HrmsApi};
use hrms_lite::config::{ClientConfig, API_URL_ENV};
use hrms_lite::error::ApiError;
use hrms_lite::forms::{
    AttendanceField, AttendanceForm, EmployeeField, EmployeeForm, FieldErrorMap, FormField,
    SubmitOutcome,
};
use hrms_lite::logging::{init_logging, LoggingConfig};
use hrms_lite::notification::NotificationRenderer;
use hrms_lite::state::{App, AttendanceView};
use hrms_lite::ui::{HrmsDisplay, TableRenderer};

#[derive(Parser, Debug)]
#[command(name = "hrms")]
#[command(version)]
#[command(about = "Command-line client for the HRMS Lite backend")]
struct Cli {
    /// Backend base URL (overrides HRMS_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable colors (also respects NO_COLOR environment variable)
    #[arg(long, global = true)]
    no_color: bool,

    /// Suppress all diagnostics except errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage employees
    #[command(subcommand)]
    Employees(EmployeeCommand),
    /// View and mark attendance
    #[command(subcommand)]
    Attendance(AttendanceCommand),
}

#[derive(Subcommand, Debug)]
enum EmployeeCommand {
    /// List all employees
    List,
    /// Show a single employee by record id
    Get {
        /// Record id of the employee
        id: String,
    },
    /// Add a new employee
    Add(AddEmployeeArgs),
    /// Delete an employee by record id
    Delete {
        /// Record id of the employee
        id: String,

        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct AddEmployeeArgs {
    /// Employee code, e.g. EMP001
    #[arg(long, default_value = "")]
    employee_id: String,

    #[arg(long, default_value = "")]
    full_name: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    department: String,
}

#[derive(Subcommand, Debug)]
enum AttendanceCommand {
    /// List attendance records, optionally filtered
    List {
        #[arg(long)]
        employee_id: Option<String>,

        /// Date in YYYY-MM-DD format
        #[arg(long)]
        date: Option<String>,

        /// Present or Absent
        #[arg(long)]
        status: Option<AttendanceStatus>,
    },
    /// Show records and totals for one employee
    Show {
        /// Employee code
        employee_id: String,
    },
    /// Mark attendance for an employee
    Mark {
        /// Employee code (defaults to the first employee)
        #[arg(long)]
        employee_id: Option<String>,

        /// Date in YYYY-MM-DD format (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Present or Absent
        #[arg(long, default_value = "Present")]
        status: String,
    },
    /// Show attendance totals for one employee
    Stats {
        /// Employee code
        employee_id: String,
    },
}

/// Exit codes for the client
mod exit_codes {
    use std::process::ExitCode;

    /// The request was rejected or could not be completed
    pub fn request_failed() -> ExitCode {
        ExitCode::from(1)
    }

    /// Input failed local validation; nothing was sent
    pub fn invalid_input() -> ExitCode {
        ExitCode::from(65)
    }

    /// The configuration or backend address is unusable
    pub fn config_error() -> ExitCode {
        ExitCode::from(78)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut display = HrmsDisplay::new();
    if cli.no_color {
        display.set_colors_enabled(false);
    }

    init_logging(
        LoggingConfig::from_flags(cli.verbose, cli.quiet).with_ansi(display.colors_enabled()),
    );

    let api_url = cli.api_url.clone().or_else(|| {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
    });
    let config = match ClientConfig::load_with_override(cli.config.as_deref(), api_url) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(exit_codes::config_error());
        }
    };
    let client = match ApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(exit_codes::config_error());
        }
    };
    tracing::debug!(base_url = %client.base_url(), "Using backend");

    let mut app = App::new(client, config.notification_ttl());

    let code = match cli.command {
        Commands::Employees(command) => run_employees(&mut app, &display, command).await,
        Commands::Attendance(command) => run_attendance(&mut app, &display, command).await,
    };
    Ok(code)
}

async fn run_employees<A: HrmsApi>(
    app: &mut App<A>,
    display: &HrmsDisplay,
    command: EmployeeCommand,
) -> ExitCode {
    let tables = TableRenderer::new(display);

    match command {
        EmployeeCommand::List => {
            if let Err(error) = app.load_employees().await {
                return report_failure(display, &error);
            }
            println!("{}", tables.employees(&app.state().employees));
            ExitCode::SUCCESS
        }
        EmployeeCommand::Get { id } => match app.api().get_employee(&id).await {
            Ok(employee) => {
                println!("{}", tables.employees(std::slice::from_ref(&employee)));
                ExitCode::SUCCESS
            }
            Err(error) => report_failure(display, &error),
        },
        EmployeeCommand::Add(args) => {
            let mut form = EmployeeForm::new();
            form.set(EmployeeField::EmployeeId, args.employee_id);
            form.set(EmployeeField::FullName, args.full_name);
            form.set(EmployeeField::Email, args.email);
            form.set(EmployeeField::Department, args.department);

            let outcome = app.add_employee(&mut form).await;
            finish_submission(app, display, outcome)
        }
        EmployeeCommand::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this employee?") {
                println!("Cancelled.");
                return ExitCode::SUCCESS;
            }
            let result = app.delete_employee(&id).await;
            print_notification(app, display);
            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(_) => exit_codes::request_failed(),
            }
        }
    }
}

async fn run_attendance<A: HrmsApi>(
    app: &mut App<A>,
    display: &HrmsDisplay,
    command: AttendanceCommand,
) -> ExitCode {
    let tables = TableRenderer::new(display);

    match command {
        AttendanceCommand::List {
            employee_id,
            date,
            status,
        } => {
            let query = AttendanceQuery {
                employee_id,
                date,
                status,
            };
            match app.api().list_attendance(&query).await {
                Ok(records) => {
                    println!("{}", tables.attendance(&records));
                    ExitCode::SUCCESS
                }
                Err(error) => report_failure(display, &error),
            }
        }
        AttendanceCommand::Show { employee_id } => {
            let mut view = AttendanceView::new();
            view.select(employee_id);
            view.refresh(app.api(), app.state().attendance_refresh_key)
                .await;

            if let Some(message) = view.error() {
                eprintln!(
                    "{}",
                    NotificationRenderer::new(display).render_banner(message, None)
                );
                return exit_codes::request_failed();
            }
            if let Some(stats) = view.stats() {
                println!("{}\n", tables.stats(stats));
            }
            println!("{}", tables.attendance(view.records()));
            ExitCode::SUCCESS
        }
        AttendanceCommand::Mark {
            employee_id,
            date,
            status,
        } => {
            let mut form = AttendanceForm::new();
            match employee_id {
                Some(employee_id) => form.set(AttendanceField::EmployeeId, employee_id),
                None => {
                    if let Err(error) = app.load_employees().await {
                        return report_failure(display, &error);
                    }
                    form.select_default_employee(&app.state().employees);
                }
            }
            if let Some(date) = date {
                form.set(AttendanceField::Date, date);
            }
            form.set(AttendanceField::Status, status);

            let outcome = app.mark_attendance(&mut form).await;
            finish_submission(app, display, outcome)
        }
        AttendanceCommand::Stats { employee_id } => {
            match app.api().attendance_stats(&employee_id).await {
                Ok(stats) => {
                    println!("{}", tables.stats(&stats));
                    ExitCode::SUCCESS
                }
                Err(error) => report_failure(display, &error),
            }
        }
    }
}

/// Prints the result of a form submission and picks the exit code.
fn finish_submission<A: HrmsApi, T, F: FormField>(
    app: &App<A>,
    display: &HrmsDisplay,
    outcome: SubmitOutcome<T, F>,
) -> ExitCode {
    match outcome {
        SubmitOutcome::Submitted(_) => {
            print_notification(app, display);
            ExitCode::SUCCESS
        }
        SubmitOutcome::Invalid(errors) => {
            print_field_errors(display, &errors);
            exit_codes::invalid_input()
        }
        SubmitOutcome::Rejected { message, field } => {
            let renderer = NotificationRenderer::new(display);
            eprintln!(
                "{}",
                renderer.render_banner(&message, field.map(|f| f.name()))
            );
            exit_codes::request_failed()
        }
        // A one-shot command never has a submission in flight.
        SubmitOutcome::InFlight => exit_codes::request_failed(),
    }
}

fn print_field_errors<F: FormField>(display: &HrmsDisplay, errors: &FieldErrorMap<F>) {
    use owo_colors::OwoColorize;

    for (field, message) in errors.iter() {
        let line = format!("{}: {}", field.name(), message);
        if display.colors_enabled() {
            eprintln!("{}", line.color(display.theme().error));
        } else {
            eprintln!("{}", line);
        }
    }
}

/// Prints the current notification, success to stdout and errors to stderr.
fn print_notification<A: HrmsApi>(app: &App<A>, display: &HrmsDisplay) {
    let Some(notification) = app.state().notification.as_ref() else {
        return;
    };
    let panel = NotificationRenderer::new(display).render(notification);
    if notification.is_error() {
        eprintln!("{}", panel);
    } else {
        println!("{}", panel);
    }
}

fn report_failure(display: &HrmsDisplay, error: &ApiError) -> ExitCode {
    eprintln!(
        "{}",
        NotificationRenderer::new(display).render_banner(error.message(), None)
    );
    exit_codes::request_failed()
}

/// Asks a yes/no question on stdin; anything but "y" or "yes" declines.
fn confirm(question: &str) -> bool {
    print!("{} [y/N] ", question);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
