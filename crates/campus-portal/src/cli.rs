//! The `campus` command line.
//!
//! Each subcommand maps to one portal page or form. Arguments become the
//! page's filter struct, the page query runs against the catalog, and the
//! result goes through the [`Renderer`].

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use campus_query::{Dir, FieldFilter};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use crate::assistant::{FaqResponder, StudyAssistant};
use crate::catalog::Catalog;
use crate::config::PortalConfig;
use crate::forum::{ForumBoard, PostDraft};
use crate::model::{Announcement, Course, ForumCategory, ForumPost, Scholarship, User};
use crate::pages::{self, FilterOptions, Page};
use crate::profile::{ProfileUpdate, SIGN_IN_REQUIRED};
use crate::render::{OutputMode, Renderer};
use crate::validation::{ContactForm, FormErrors, SignIn, SignUp};

#[derive(Debug, Parser)]
#[command(name = "campus", version, about = "Browse the student portal catalog from the terminal")]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file (JSON or YAML) replacing the bundled data
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputMode::Auto)]
    pub output: OutputMode,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the course catalog
    Courses(CourseArgs),
    /// List scholarships, internships and student jobs by deadline
    Scholarships(ScholarshipArgs),
    /// Read or write on the forum
    Forum {
        #[command(subcommand)]
        action: ForumAction,
    },
    /// Show the week timetable of a semester and group
    Timetable(TimetableArgs),
    /// Show announcements, newest first
    Announcements,
    /// List the filter choices of a page
    Options {
        #[arg(value_enum)]
        page: Page,
    },
    /// Ask the study assistant
    Ask {
        /// The question
        prompt: Vec<String>,
    },
    /// Validate a sign-up form
    CheckSignup(SignUpArgs),
    /// Validate a sign-in form
    CheckSignin(SignInArgs),
    /// Validate a contact form
    CheckContact(ContactArgs),
    /// Show or edit the student profile
    Profile(ProfileArgs),
}

#[derive(Debug, Args)]
pub struct CourseArgs {
    /// Text searched in title, code and lecturer
    #[arg(short, long, default_value = "")]
    pub search: String,
    #[arg(long)]
    pub semester: Option<String>,
    #[arg(long)]
    pub discipline: Option<String>,
    #[arg(long)]
    pub level: Option<String>,
    /// Extra filter, as field=value (repeatable)
    #[arg(long = "where", value_name = "FIELD=VALUE")]
    pub filters: Vec<FieldFilter>,
}

#[derive(Debug, Args)]
pub struct ScholarshipArgs {
    /// Text searched in title, organization and country
    #[arg(short, long, default_value = "")]
    pub search: String,
    #[arg(long)]
    pub domain: Option<String>,
    /// Offer type: Scholarship, Internship or "Student Job"
    #[arg(long = "type")]
    pub kind: Option<String>,
    /// Deadline order: asc or desc
    #[arg(long, default_value = "asc")]
    pub dir: Dir,
}

#[derive(Debug, Subcommand)]
pub enum ForumAction {
    /// List posts
    List(ForumListArgs),
    /// Publish a post and show the board
    Post(ForumPostArgs),
    /// Comment on a post and show the board
    Comment(ForumCommentArgs),
}

#[derive(Debug, Args)]
pub struct ForumListArgs {
    /// Text searched in title, content and author
    #[arg(short, long, default_value = "")]
    pub search: String,
    #[arg(long)]
    pub category: Option<ForumCategory>,
}

#[derive(Debug, Args)]
pub struct ForumPostArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
    /// Defaults to General
    #[arg(long)]
    pub category: Option<ForumCategory>,
}

#[derive(Debug, Args)]
pub struct ForumCommentArgs {
    /// Id of the post, e.g. f1
    #[arg(long)]
    pub post: String,
    #[arg(long)]
    pub content: String,
}

#[derive(Debug, Args)]
pub struct TimetableArgs {
    #[arg(long, default_value = pages::SEMESTERS[0])]
    pub semester: String,
    #[arg(long, default_value = pages::GROUPS[0])]
    pub group: String,
}

#[derive(Debug, Args)]
pub struct SignUpArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
    #[arg(long, default_value = "")]
    pub confirm_password: String,
}

#[derive(Debug, Args)]
pub struct SignInArgs {
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub message: String,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Field of study
    #[arg(long)]
    pub major: Option<String>,
    /// CV file to attach
    #[arg(long, value_name = "FILE")]
    pub cv: Option<String>,
}

#[derive(Serialize)]
struct CoursesView<'a> {
    courses: Vec<&'a Course>,
}

#[derive(Serialize)]
struct ScholarshipsView<'a> {
    scholarships: Vec<&'a Scholarship>,
}

#[derive(Serialize)]
struct ForumView<'a> {
    posts: Vec<&'a ForumPost>,
}

#[derive(Serialize)]
struct AnnouncementsView<'a> {
    announcements: Vec<&'a Announcement>,
}

#[derive(Serialize)]
struct OptionsView {
    page: Page,
    filters: Vec<FilterOptions>,
}

#[derive(Serialize)]
struct FormView<'a> {
    form: &'static str,
    valid: bool,
    errors: &'a FormErrors,
}

#[derive(Serialize)]
struct ProfileView<'a> {
    user: &'a User,
}

#[derive(Serialize)]
struct AnswerView<'a> {
    prompt: &'a str,
    answer: &'a str,
}

/// How a command ended, when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// A checked form has invalid fields.
    InvalidForm,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::InvalidForm => ExitCode::FAILURE,
        }
    }
}

/// Runs a parsed command line, writing page output to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<Outcome> {
    let config = PortalConfig::resolve(cli.config.as_deref()).context("loading configuration")?;

    let data = cli.data.as_deref().or(config.data.as_deref());
    let catalog = Catalog::load_or_builtin(data).context("loading catalog")?;
    debug!(source = ?data, "catalog ready");

    let renderer = Renderer::new(cli.output).context("preparing templates")?;

    let rendered = match &cli.command {
        Command::Courses(args) => {
            let filters = pages::CourseFilters {
                search: args.search.clone(),
                semester: args.semester.clone(),
                discipline: args.discipline.clone(),
                level: args.level.clone(),
                extra: args.filters.clone(),
            };
            let courses = pages::courses(&catalog, &filters);
            renderer.render("courses", &CoursesView { courses })?
        }
        Command::Scholarships(args) => {
            let filters = pages::ScholarshipFilters {
                search: args.search.clone(),
                domain: args.domain.clone(),
                kind: args.kind.clone(),
                dir: args.dir,
            };
            let scholarships = pages::scholarships(&catalog, &filters);
            renderer.render("scholarships", &ScholarshipsView { scholarships })?
        }
        Command::Forum { action } => {
            let mut board = ForumBoard::new(catalog.forum_posts.clone())
                .with_author(config.forum.author.as_str())
                .with_commenter(config.forum.commenter.as_str());

            let filters = match action {
                ForumAction::List(args) => pages::ForumFilters {
                    search: args.search.clone(),
                    category: args.category,
                },
                ForumAction::Post(args) => {
                    let mut draft = PostDraft::new(args.title.as_str(), args.content.as_str());
                    draft.category = args.category;
                    let post = board.publish(draft)?;
                    info!(id = %post.id, "published");
                    pages::ForumFilters::default()
                }
                ForumAction::Comment(args) => {
                    let comment = board.comment(&args.post, &args.content)?;
                    info!(id = %comment.id, "commented");
                    pages::ForumFilters::default()
                }
            };
            let posts = pages::forum_posts(board.posts(), &filters);
            renderer.render("forum", &ForumView { posts })?
        }
        Command::Timetable(args) => {
            let filters = pages::TimetableFilters {
                semester: args.semester.clone(),
                group: args.group.clone(),
            };
            renderer.render("timetable", &pages::week_view(&catalog, &filters))?
        }
        Command::Announcements => {
            let announcements = pages::latest_announcements(&catalog);
            renderer.render("announcements", &AnnouncementsView { announcements })?
        }
        Command::Options { page } => {
            let filters = pages::page_options(&catalog, *page);
            renderer.render("options", &OptionsView { page: *page, filters })?
        }
        Command::Ask { prompt } => {
            let prompt = prompt.join(" ");
            let assistant = StudyAssistant::new(
                FaqResponder::new(catalog.faqs.clone()),
                config.assistant.clone(),
            );
            match assistant.ask_or_apologize(&prompt) {
                Some(answer) => {
                    if renderer.mode().is_structured() {
                        renderer.render("answer", &AnswerView { prompt: &prompt, answer: &answer })?
                    } else {
                        answer
                    }
                }
                None => anyhow::bail!("the question is empty"),
            }
        }
        Command::CheckSignup(args) => {
            let form = SignUp {
                name: args.name.clone(),
                email: args.email.clone(),
                password: args.password.clone(),
                confirm_password: args.confirm_password.clone(),
            };
            return write_form(&renderer, out, "signup", &form.validate());
        }
        Command::CheckSignin(args) => {
            let form = SignIn {
                email: args.email.clone(),
                password: args.password.clone(),
            };
            return write_form(&renderer, out, "signin", &form.validate());
        }
        Command::CheckContact(args) => {
            let form = ContactForm {
                name: args.name.clone(),
                email: args.email.clone(),
                message: args.message.clone(),
            };
            return write_form(&renderer, out, "contact", &form.validate());
        }
        Command::Profile(args) => {
            let Some(user) = catalog.user.as_ref() else {
                anyhow::bail!(SIGN_IN_REQUIRED);
            };
            let update = ProfileUpdate {
                name: args.name.clone(),
                email: args.email.clone(),
                major: args.major.clone(),
                cv_file: args.cv.clone(),
            };
            match update.apply(user) {
                Ok(updated) => {
                    if !update.is_empty() {
                        info!(id = %updated.id, "profile updated");
                    }
                    renderer.render("profile", &ProfileView { user: &updated })?
                }
                Err(errors) => return write_form(&renderer, out, "profile", &errors),
            }
        }
    };

    writeln!(out, "{rendered}").context("writing output")?;
    Ok(Outcome::Done)
}

fn write_form(
    renderer: &Renderer,
    out: &mut dyn Write,
    form: &'static str,
    errors: &FormErrors,
) -> Result<Outcome> {
    let valid = errors.is_valid();
    debug!(form, invalid_fields = errors.len(), "form checked");

    let rendered = renderer.render("form_errors", &FormView { form, valid, errors })?;
    writeln!(out, "{rendered}").context("writing output")?;

    Ok(if valid {
        Outcome::Done
    } else {
        Outcome::InvalidForm
    })
}
