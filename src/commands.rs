//! Command handlers for CLI subcommands.

use std::fmt::Write as _;

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::api::{AttendanceApi, RemoteApi};
use crate::cli::{Cli, Commands, EmployeeArgs, LocationArgs};
use crate::client::AttendanceClient;
use crate::config::{AttendanceConfig, ClientConfig, ConfigLoader};
use crate::error::{AttendanceError, AttendanceResult};
use crate::evaluation::{evaluate, schedule, sort_holidays};
use crate::models::{
    ActionKind, AttendanceVerdict, HolidayFilter, LeaveRequest, OvertimeRequest, ScheduledHoliday,
};

/// Execute a parsed command line.
pub async fn execute(cli: Cli) -> AttendanceResult<()> {
    let now = Local::now().naive_local();

    match &cli.command {
        Commands::Evaluate { action, at } => {
            let schedule = offline_schedule(&cli)?;
            let verdict = evaluate(*action, at.unwrap_or(now), &schedule);
            println!("{}", render_verdict(&verdict));
            Ok(())
        }
        Commands::Holidays { filter, date } => {
            let config = load_config(&cli)?;
            let api = RemoteApi::new(config.endpoint())?;
            cmd_holidays(&api, HolidayFilter::from_name(filter), date.unwrap_or(now.date())).await
        }
        Commands::Status { employee } => {
            let mut client = connect(&cli)?;
            cmd_status(&mut client, employee, now.date()).await
        }
        Commands::CheckIn { employee, location } => {
            let mut client = connect(&cli)?;
            cmd_record(&mut client, employee, location, ActionKind::CheckIn, now).await
        }
        Commands::CheckOut { employee, location } => {
            let mut client = connect(&cli)?;
            cmd_record(&mut client, employee, location, ActionKind::CheckOut, now).await
        }
        Commands::Overtime {
            employee,
            date,
            time,
            reason,
        } => {
            let request = OvertimeRequest {
                date: *date,
                time: time.clone(),
                reason: reason.clone(),
            };
            let mut client = connect(&cli)?;
            client.login(&employee.employee_id, now.date(), None).await?;
            client.submit_overtime(&request).await?;
            client.logout();
            println!("Overtime request for {} submitted", request.date);
            Ok(())
        }
        Commands::Leave {
            employee,
            leave_type,
            start,
            end,
            reason,
        } => {
            let request = LeaveRequest {
                leave_type: *leave_type,
                start_date: *start,
                end_date: *end,
                reason: reason.clone(),
            };
            let mut client = connect(&cli)?;
            client.login(&employee.employee_id, now.date(), None).await?;
            client.submit_leave(&request).await?;
            client.logout();
            println!(
                "{} leave request for {} day(s) from {} submitted",
                request.leave_type,
                request.days(),
                request.start_date
            );
            Ok(())
        }
    }
}

/// Loads the configuration file, applying the `--endpoint` override.
///
/// A missing file is tolerated when the endpoint is given on the command
/// line; the schedule then takes its defaults.
fn load_config(cli: &Cli) -> AttendanceResult<ConfigLoader> {
    match (ConfigLoader::load(&cli.config), &cli.endpoint) {
        (Ok(loader), Some(url)) => loader.with_endpoint_url(url.clone()),
        (Ok(loader), None) => Ok(loader),
        (Err(AttendanceError::ConfigNotFound { path }), Some(url)) => {
            debug!(path = %path, "No configuration file, using defaults");
            ConfigLoader::from_config(ClientConfig::with_endpoint(url.clone()))
        }
        (Err(err), _) => Err(err),
    }
}

/// The schedule for offline evaluation; a missing file means defaults.
fn offline_schedule(cli: &Cli) -> AttendanceResult<AttendanceConfig> {
    match ConfigLoader::load(&cli.config) {
        Ok(loader) => Ok(*loader.schedule()),
        Err(AttendanceError::ConfigNotFound { path }) => {
            debug!(path = %path, "No configuration file, using default schedule");
            Ok(AttendanceConfig::default())
        }
        Err(err) => Err(err),
    }
}

fn connect(cli: &Cli) -> AttendanceResult<AttendanceClient<RemoteApi>> {
    let config = load_config(cli)?;
    let api = RemoteApi::new(config.endpoint())?;
    Ok(AttendanceClient::new(api, config.config()))
}

async fn cmd_holidays<A: AttendanceApi>(
    api: &A,
    filter: HolidayFilter,
    reference: NaiveDate,
) -> AttendanceResult<()> {
    let records = sort_holidays(api.all_holidays().await?);
    let view = schedule(&records, filter, reference);
    println!("{}", render_holidays(&view, filter));
    Ok(())
}

async fn cmd_status<A: AttendanceApi>(
    client: &mut AttendanceClient<A>,
    employee: &EmployeeArgs,
    today: NaiveDate,
) -> AttendanceResult<()> {
    let employee = client.login(&employee.employee_id, today, None).await?;
    if let Some(session) = client.session() {
        println!("{} ({}): {}", employee.name, employee.id, session.status_text());
        if let Some(holiday) = session.today_holiday() {
            println!("Today is a holiday: {}", holiday);
        }
    }
    client.logout();
    Ok(())
}

async fn cmd_record<A: AttendanceApi>(
    client: &mut AttendanceClient<A>,
    employee: &EmployeeArgs,
    location: &LocationArgs,
    action: ActionKind,
    now: NaiveDateTime,
) -> AttendanceResult<()> {
    let employee = client
        .login(&employee.employee_id, now.date(), Some(location.source()))
        .await?;
    let verdict = client.record_attendance(action, now).await?;

    println!("{}: {} recorded", employee.name, action);
    match client.require_location() {
        Ok(position) => println!("Location: {}", position),
        Err(err) => println!("Location: unavailable ({})", err),
    }
    println!("{}", render_verdict(&verdict));
    client.logout();
    Ok(())
}

/// Formats a verdict as a severity line followed by message and detail.
pub fn render_verdict(verdict: &AttendanceVerdict) -> String {
    format!(
        "[{}] {}\n{}\n{}",
        verdict.severity.to_string().to_uppercase(),
        verdict.status_label,
        verdict.message,
        verdict.detail
    )
}

/// Formats scheduled holidays as one `date  name  status` row each.
pub fn render_holidays(holidays: &[ScheduledHoliday], filter: HolidayFilter) -> String {
    if holidays.is_empty() {
        return format!("No holidays to show (filter: {})", filter);
    }

    let width = holidays
        .iter()
        .map(|h| h.record.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, holiday) in holidays.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{}  {:<width$}  {}",
            holiday.record.date.format("%Y-%m-%d"),
            holiday.record.name,
            holiday.category,
            width = width
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HolidayCategory, HolidayRecord};

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_render_very_late_verdict() {
        let verdict = evaluate(
            ActionKind::CheckIn,
            at("2025-01-06 08:20"),
            &AttendanceConfig::default(),
        );
        assert_eq!(
            render_verdict(&verdict),
            "[DANGER] very late by 20 minutes\n\
             Checked in 20 minutes late\n\
             Check-in time: 08:20 (scheduled: 08:00)"
        );
    }

    #[test]
    fn test_render_on_time_checkout() {
        let verdict = evaluate(
            ActionKind::CheckOut,
            at("2025-01-06 17:30"),
            &AttendanceConfig::default(),
        );
        assert!(render_verdict(&verdict).starts_with("[SUCCESS] on time checkout\n"));
    }

    #[test]
    fn test_render_holidays_rows() {
        let holidays = vec![
            ScheduledHoliday {
                record: HolidayRecord::new(date(2025, 1, 1), "New Year"),
                category: HolidayCategory::Today,
            },
            ScheduledHoliday {
                record: HolidayRecord::new(date(2025, 4, 13), "Songkran"),
                category: HolidayCategory::Upcoming { days_until: 102 },
            },
        ];

        assert_eq!(
            render_holidays(&holidays, HolidayFilter::All),
            "2025-01-01  New Year  today\n2025-04-13  Songkran  in 102 days"
        );
    }

    #[test]
    fn test_render_empty_holidays() {
        assert_eq!(
            render_holidays(&[], HolidayFilter::Past),
            "No holidays to show (filter: past)"
        );
    }

    #[test]
    fn test_offline_schedule_defaults_when_file_missing() {
        use clap::Parser;

        let cli = Cli::parse_from([
            "attendance",
            "--config",
            "/nonexistent/attendance.yaml",
            "evaluate",
            "--action",
            "check-in",
        ]);
        assert_eq!(offline_schedule(&cli).unwrap(), AttendanceConfig::default());
    }

    #[test]
    fn test_missing_config_needs_endpoint_override() {
        use clap::Parser;

        let cli = Cli::parse_from([
            "attendance",
            "--config",
            "/nonexistent/attendance.yaml",
            "holidays",
        ]);
        assert!(matches!(
            load_config(&cli),
            Err(AttendanceError::ConfigNotFound { .. })
        ));

        let cli = Cli::parse_from([
            "attendance",
            "--config",
            "/nonexistent/attendance.yaml",
            "--endpoint",
            "http://localhost:8080/exec",
            "holidays",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.endpoint().url, "http://localhost:8080/exec");
    }
}
