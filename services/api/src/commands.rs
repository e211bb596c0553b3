use crate::infra::{load_board, parse_timestamp};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use jobhub::applications::{build_application_payload, ApplicationForm, ResumeUpload};
use jobhub::error::AppError;
use jobhub::files::data_uri_scheme;
use jobhub::formatting::{
    days_since_at, format_address, format_phone_number, format_shift_times, format_wage,
    format_zipcode, is_new_posting_at, AddressExtra, AddressInput, ShiftTimes, WageInput,
};
use jobhub::identity::generate_uuid;
use jobhub::postings::{JobCardView, JobDetailView, PostingPageView, PostingQuery};
use std::io;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub(crate) enum FormatCommand {
    /// Mask a phone number as xxx-xxx-xxxx
    Phone { raw: String },
    /// Reduce input to a five digit zipcode
    Zipcode { raw: String },
    /// Render a wage range
    Wage {
        #[arg(long)]
        min: Option<f64>,
        #[arg(long)]
        max: Option<f64>,
    },
    /// Compose a posting address
    Address(AddressArgs),
    /// Summarise a weekly shift schedule
    Shifts(ShiftArgs),
    /// Report how long ago a date was and whether it counts as new
    Posted {
        date: String,
        /// Evaluate against this instant instead of the current time
        #[arg(long, value_parser = parse_timestamp)]
        now: Option<DateTime<Utc>>,
    },
    /// Print the data URI scheme used for a résumé file name
    Scheme { file_name: String },
    /// Generate a visitor identifier
    Uuid,
}

#[derive(Args, Debug, Default)]
pub(crate) struct AddressArgs {
    /// Full address; wins over every other field
    #[arg(long)]
    pub(crate) address: Option<String>,
    #[arg(long)]
    pub(crate) street: Option<String>,
    #[arg(long)]
    pub(crate) city: Option<String>,
    #[arg(long)]
    pub(crate) state: Option<String>,
    #[arg(long)]
    pub(crate) postal_code: Option<String>,
}

/// Comma separated time-of-day labels per day, e.g. `--monday "Morning, Evening"`.
#[derive(Args, Debug, Default)]
pub(crate) struct ShiftArgs {
    #[arg(long)]
    pub(crate) monday: Option<String>,
    #[arg(long)]
    pub(crate) tuesday: Option<String>,
    #[arg(long)]
    pub(crate) wednesday: Option<String>,
    #[arg(long)]
    pub(crate) thursday: Option<String>,
    #[arg(long)]
    pub(crate) friday: Option<String>,
    #[arg(long)]
    pub(crate) saturday: Option<String>,
    #[arg(long)]
    pub(crate) sunday: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PostingsListArgs {
    /// Postings CSV export (defaults to JOBHUB_POSTINGS_CSV)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Case-insensitive company filter
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Case-insensitive title filter
    #[arg(long)]
    pub(crate) title: Option<String>,
    /// Postal code filter
    #[arg(long)]
    pub(crate) zipcode: Option<String>,
    /// Page number, starting at 1
    #[arg(long)]
    pub(crate) page: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct PostingsShowArgs {
    /// Postings CSV export (defaults to JOBHUB_POSTINGS_CSV)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Posting slug
    pub(crate) slug: String,
}

#[derive(Args, Debug)]
pub(crate) struct ApplyPreviewArgs {
    #[arg(long)]
    pub(crate) first_name: String,
    #[arg(long)]
    pub(crate) last_name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, default_value = "")]
    pub(crate) phone: String,
    #[arg(long, default_value = "")]
    pub(crate) zipcode: String,
    /// Résumé to attach (.pdf, .doc or .docx)
    #[arg(long)]
    pub(crate) resume: Option<PathBuf>,
    /// Reference number of the posting being applied to
    #[arg(long)]
    pub(crate) job_reference: Option<String>,
}

pub(crate) fn run_format(command: FormatCommand) -> Result<(), AppError> {
    println!("{}", format_output(command));
    Ok(())
}

fn format_output(command: FormatCommand) -> String {
    match command {
        FormatCommand::Phone { raw } => format_phone_number(&raw),
        FormatCommand::Zipcode { raw } => format_zipcode(&raw),
        FormatCommand::Wage { min, max } => format_wage(WageInput::new(min, max)),
        FormatCommand::Address(args) => format_address(&AddressInput {
            address: args.address,
            extra: Some(AddressExtra {
                street_address: args.street,
                city: args.city,
                state: args.state,
            }),
            postal_code: args.postal_code,
        }),
        FormatCommand::Shifts(args) => {
            let shifts = ShiftTimes {
                monday: args.monday,
                tuesday: args.tuesday,
                wednesday: args.wednesday,
                thursday: args.thursday,
                friday: args.friday,
                saturday: args.saturday,
                sunday: args.sunday,
            };
            let summary = format_shift_times(Some(&shifts));
            format!(
                "days: {}\ntimes: {}",
                summary.days.as_deref().unwrap_or("-"),
                summary.times.as_deref().unwrap_or("-")
            )
        }
        FormatCommand::Posted { date, now } => {
            let now = now.unwrap_or_else(Utc::now);
            match days_since_at(date.as_str(), now) {
                Some(days) => format!(
                    "{} day(s) ago{}",
                    days,
                    if is_new_posting_at(Some(date.as_str()), now) {
                        " (new)"
                    } else {
                        ""
                    }
                ),
                None => format!("unrecognised date '{date}'"),
            }
        }
        FormatCommand::Scheme { file_name } => data_uri_scheme(&file_name),
        FormatCommand::Uuid => generate_uuid(),
    }
}

pub(crate) fn run_postings_list(args: PostingsListArgs) -> Result<(), AppError> {
    let PostingsListArgs {
        csv,
        company,
        title,
        zipcode,
        page,
    } = args;

    let board = load_board(csv)?.ok_or_else(missing_export)?;
    let query = PostingQuery {
        company,
        title,
        zipcode,
        page,
    };
    let view = board.search(&query).cards(Utc::now());
    render_postings_page(&view);
    Ok(())
}

pub(crate) fn run_postings_show(args: PostingsShowArgs) -> Result<(), AppError> {
    let board = load_board(args.csv)?.ok_or_else(missing_export)?;
    let posting = board.find_by_slug(&args.slug).ok_or_else(|| {
        AppError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no posting with slug '{}'", args.slug),
        ))
    })?;

    render_posting_detail(&JobDetailView::from_posting(&posting, Utc::now()));
    Ok(())
}

pub(crate) async fn run_apply_preview(args: ApplyPreviewArgs) -> Result<(), AppError> {
    let form = ApplicationForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email_address: args.email,
        phone: args.phone,
        zipcode: args.zipcode,
        resume: args.resume.map(ResumeUpload::from_path),
    };

    let payload =
        build_application_payload(&form, args.job_reference.as_deref(), Utc::now()).await?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn missing_export() -> AppError {
    AppError::Io(io::Error::new(
        io::ErrorKind::NotFound,
        "no postings export: pass --csv or set JOBHUB_POSTINGS_CSV",
    ))
}

fn render_postings_page(view: &PostingPageView) {
    println!(
        "Postings page {}/{} ({} total)",
        view.page,
        view.total_pages.max(1),
        view.total_count
    );

    if view.items.is_empty() {
        println!("\nNo postings match the current filters");
        return;
    }

    for card in &view.items {
        println!("\n{}", card_line(card));
    }
}

fn card_line(card: &JobCardView) -> String {
    let mut line = format!("- {} at {}", card.title, card.company);
    if card.is_new {
        line.push_str(" [new]");
    }
    if let Some(locality) = &card.locality {
        line.push_str(&format!(" | {locality}"));
    }
    if let Some(days) = card.posted_days_ago {
        line.push_str(&format!(" | posted {days} day(s) ago"));
    }
    line.push_str(&format!(" | /jobs/{}", card.slug));
    line
}

fn render_posting_detail(view: &JobDetailView) {
    println!("{} at {}{}", view.title, view.company, if view.is_new { " [new]" } else { "" });
    if let Some(reference) = &view.reference_number {
        println!("Reference: {reference}");
    }
    if let Some(employment_type) = &view.employment_type {
        println!("Type: {employment_type}");
    }
    println!("Pay: {}", view.wage);
    match (&view.shift_days, &view.shift_times) {
        (Some(days), Some(times)) => println!("Schedule: {days}, {times}"),
        (Some(days), None) => println!("Schedule: {days}"),
        _ => println!("Schedule: not specified"),
    }
    println!("Location:\n{}", view.address);
    if let Some(days) = view.posted_days_ago {
        println!("Posted {days} day(s) ago");
    }
}
