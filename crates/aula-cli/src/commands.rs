use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};

use aula_core::models::{Grade, Record};
use aula_core::net::{ApiClient, NewMessageRequest, ProfileEditRequest};
use aula_core::store::{ActivitiesStore, ListSync, MessagesStore, PeopleStore, ReportsStore};
use aula_core::{ClientCommand, CoreConfig, CoreRuntime, DataChange, Resource, Session};

use crate::config::CliConfig;
use crate::ListArgs;

pub fn save_domain(url: &str) -> Result<()> {
    let path = CliConfig::default_path().context("no config directory available")?;
    let config = CliConfig {
        domain: Some(url.trim_end_matches('/').to_string()),
    };
    config.save(&path)?;
    println!("Saved domain {url}");
    Ok(())
}

/// Domain for this invocation: the --domain flag wins over the saved config.
pub fn resolve_config(flag: Option<String>) -> Result<CoreConfig> {
    if let Some(domain) = flag {
        return Ok(CoreConfig::new(domain));
    }
    let saved = CliConfig::default_path()
        .map(|path| CliConfig::load(&path))
        .unwrap_or_default();
    match saved.domain {
        Some(domain) => Ok(CoreConfig::new(domain)),
        None => bail!("no server configured; run `aula domain <url>` first"),
    }
}

fn require_session() -> Result<Session> {
    Session::load().context("not signed in; run `aula login` and `aula school` first")
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

fn format_date(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

// ===== Session lifecycle =====

pub fn login(config: &CoreConfig, id: &str, password: &str) -> Result<()> {
    let rt = runtime()?;
    let response = rt.block_on(ApiClient::login(config, id, password))?;
    Session::save_token(&response.token);
    if response.schools.is_empty() {
        println!("Signed in, but no schools are linked to this account.");
        return Ok(());
    }
    println!("Signed in. Choose a school with `aula school <id>`:");
    for school in &response.schools {
        println!("  {}  {}", school.id, school.name);
    }
    Ok(())
}

pub fn choose_school(id: &str) -> Result<()> {
    let token = Session::load_token().context("not signed in; run `aula login` first")?;
    Session::new(token, id).save();
    println!("School {id} selected.");
    Ok(())
}

pub fn logout() -> Result<()> {
    Session::clear();
    println!("Signed out.");
    Ok(())
}

pub fn whoami(config: &CoreConfig) -> Result<()> {
    let api = ApiClient::new(config, require_session()?);
    let rt = runtime()?;
    let user = rt.block_on(api.fetch_info())?;
    let role = if user.administrator {
        "administrator"
    } else if user.is_teacher() {
        "teacher"
    } else {
        "student/parent"
    };
    println!("{} ({role}, id {})", user.name, user.id);
    Ok(())
}

// ===== List views =====

fn print_window<R: Record>(list: &ListSync<R>, describe: impl Fn(&R) -> String) {
    for record in list.window() {
        println!("{}", describe(record));
    }
    let shown = list.window_len();
    let total = list.filtered().len();
    if shown < total {
        println!("... {} of {} shown (use --all for the rest)", shown, total);
    }
}

fn apply_list_args<R: Record>(list: &mut ListSync<R>, args: &ListArgs) {
    list.set_query(args.search.as_deref());
    list.set_date(args.date);
    if args.all {
        while !list.is_complete() {
            list.load_more();
        }
    }
}

pub fn list_messages(config: &CoreConfig, args: &ListArgs) -> Result<()> {
    let api = ApiClient::new(config, require_session()?);
    let rt = runtime()?;
    let mut store = MessagesStore::new();
    store.load(rt.block_on(api.fetch_messages())?);
    apply_list_args(&mut store.list, args);
    if store.list.window().is_empty() {
        println!("No messages!");
        return Ok(());
    }
    print_window(&store.list, |m| {
        format!("{}  {}  from {}", format_date(m.date), m.title, m.author.name)
    });
    Ok(())
}

pub fn list_activities(
    config: &CoreConfig,
    args: &ListArgs,
    expires: Option<NaiveDate>,
) -> Result<()> {
    let api = ApiClient::new(config, require_session()?);
    let rt = runtime()?;
    let mut store = ActivitiesStore::new();
    store.load(rt.block_on(api.fetch_activities())?);
    store.list.set_secondary_date(expires);
    apply_list_args(&mut store.list, args);
    if store.list.window().is_empty() {
        println!("No activities!");
        return Ok(());
    }
    print_window(&store.list, |a| {
        format!(
            "{}  {} [{}] due {}",
            format_date(a.date),
            a.title,
            a.subject,
            format_date(a.expiration)
        )
    });
    Ok(())
}

pub fn list_reports(config: &CoreConfig, args: &ListArgs) -> Result<()> {
    let api = ApiClient::new(config, require_session()?);
    let rt = runtime()?;
    let mut store = ReportsStore::new();
    store.load(rt.block_on(api.fetch_reports())?);
    apply_list_args(&mut store.list, args);
    if store.list.window().is_empty() {
        println!("No reports!");
        return Ok(());
    }
    print_window(&store.list, |r| {
        format!("{}  {}  by {}", format_date(r.date), r.title, r.author.name)
    });
    Ok(())
}

pub fn list_people(config: &CoreConfig, search: Option<&str>) -> Result<()> {
    let api = ApiClient::new(config, require_session()?);
    let rt = runtime()?;
    let mut store = PeopleStore::new();
    store.load(rt.block_on(api.fetch_people())?);
    store.list.set_query(search);
    while !store.list.is_complete() {
        store.list.load_more();
    }
    if store.list.window().is_empty() {
        println!("Nobody found.");
        return Ok(());
    }
    for person in store.list.window() {
        let detail = if person.subject.is_empty() {
            person.role.clone()
        } else {
            format!("{}, {}", person.role, person.subject)
        };
        println!("{}  {}  ({detail})", person.id, person.name);
    }
    Ok(())
}

fn print_grades(grades: &[Grade]) {
    for grade in grades {
        println!(
            "{}: {} / {} (final {})",
            grade.subject, grade.average_first_four, grade.average_second_four, grade.final_grade
        );
    }
}

pub fn show_grades(config: &CoreConfig, student: Option<&str>) -> Result<()> {
    let api = ApiClient::new(config, require_session()?);
    let rt = runtime()?;
    let grades = match student {
        Some(id) => rt.block_on(api.fetch_grades_for(id))?,
        None => rt.block_on(api.fetch_grades())?,
    };
    if grades.is_empty() {
        println!("No grades!");
    } else {
        print_grades(&grades);
    }
    Ok(())
}

// ===== Mutations =====

pub fn send_message(
    config: &CoreConfig,
    title: String,
    content: String,
    receivers: Vec<String>,
) -> Result<()> {
    let api = ApiClient::new(config, require_session()?);
    let rt = runtime()?;
    let request = NewMessageRequest {
        title,
        content,
        pdf: None,
        files: vec![],
        receiver: receivers,
    };
    rt.block_on(api.create_message(&request))?;
    println!("Message sent.");
    Ok(())
}

pub fn delete_message(config: &CoreConfig, id: &str) -> Result<()> {
    let api = ApiClient::new(config, require_session()?);
    let rt = runtime()?;
    rt.block_on(api.delete_message(id))?;
    println!("Message deleted.");
    Ok(())
}

pub fn edit_profile(
    config: &CoreConfig,
    name: Option<String>,
    password: Option<String>,
    current_password: String,
) -> Result<()> {
    if name.is_none() && password.is_none() {
        bail!("nothing to change; pass --name and/or --password");
    }
    let api = ApiClient::new(config, require_session()?);
    let rt = runtime()?;
    let request = ProfileEditRequest {
        name: name.unwrap_or_default(),
        password: password.unwrap_or_default(),
        current_password,
    };
    rt.block_on(api.edit_profile(&request))?;
    println!("Profile updated.");
    Ok(())
}

// ===== Live tail =====

pub fn follow(config: &CoreConfig) -> Result<()> {
    let session = require_session()?;
    let mut core = CoreRuntime::new(config.clone(), session);
    let handle = core.handle();
    handle
        .send(ClientCommand::Fetch(Resource::Messages))
        .ok();
    handle.send(ClientCommand::Connect).ok();

    let data_rx = core.take_data_rx().context("runtime already consumed")?;
    let store = core.data_store();
    store.borrow_mut().messages.list.set_loading();

    println!("Following live events; press Ctrl-C to stop.");
    while let Ok(change) = data_rx.recv() {
        match &change {
            DataChange::Live(event) => println!("{event:?}"),
            DataChange::MessagesLoaded(messages) => {
                println!("Loaded {} messages.", messages.len());
            }
            DataChange::FetchFailed { resource, error } => {
                eprintln!("Fetching {resource:?} failed: {error}");
            }
            DataChange::ConnectionLost => {
                eprintln!(
                    "We lost connection to the live socket. \
                     New posts will no longer load automatically; re-run `aula follow` to reconnect."
                );
            }
            _ => {}
        }
        let lost = matches!(&change, DataChange::ConnectionLost);
        store.borrow_mut().apply(change);
        if lost {
            break;
        }
    }
    core.shutdown();
    Ok(())
}
