//! Terminal host for the todo page: a line-oriented stand-in for the browser.

mod command;
mod terminal;

use std::io::{self, Write};

use clap::Parser;
use todo_core::{
    Api, ClientConfig, CookieCredential, CredentialProvider, PageEvent, StaticCredential,
    TodoClient, TodoPage, TodoListView, UreqTransport,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

use command::Command;
use terminal::{TerminalNavigator, TerminalUi};

#[derive(Parser, Debug)]
#[command(name = "todo-page", about = "Manage todos against a todo API from the terminal")]
struct Args {
    /// Base url of the todo API, overriding TODO_API_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Where to go when the API answers 401, overriding TODO_LOGIN_PATH
    #[arg(long)]
    login_path: Option<String>,

    /// Access token, sent verbatim as the authorization header
    #[arg(long, env = "TODO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Cookie string to read the access token from, e.g. "access_token=..."
    #[arg(long, env = "TODO_COOKIE", hide_env_values = true)]
    cookie: Option<String>,
}

fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(login_path) = args.login_path {
        config.login_path = login_path;
    }

    let credential = match (args.token, args.cookie) {
        (Some(token), _) => StaticCredential::token(&token),
        (None, Some(cookies)) => {
            StaticCredential(CookieCredential::named(&cookies, &config.cookie_name).credential())
        }
        (None, None) => StaticCredential::none(),
    };

    let navigator = TerminalNavigator::default();
    let api = Api::new(
        TodoClient::new(&config.base_url),
        UreqTransport::new(),
        credential,
        &navigator,
    )
    .with_login_path(&config.login_path);
    let mut page = TodoPage::new(api, TerminalUi);

    page.load();
    print_list(page.view());

    loop {
        if let Some(location) = navigator.location() {
            println!("navigating to {}{location}", config.base_url);
            break;
        }

        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error!("failed to read input: {err}");
                break;
            }
        }

        let command = match command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                if !line.trim().is_empty() {
                    eprintln!("{message} (try `help`)");
                }
                continue;
            }
        };

        match command {
            Command::List => {
                page.load();
                print_list(page.view());
            }
            Command::Add { title, description } => {
                let form = page.form_mut();
                form.title = title;
                form.description = description;
                page.dispatch(PageEvent::Submit);
                print_list(page.view());
            }
            Command::Toggle(id) => match page.view().item(id).map(|item| item.checked) {
                Some(checked) => {
                    page.dispatch(PageEvent::Toggle {
                        id,
                        checked: !checked,
                    });
                    print_list(page.view());
                }
                None => eprintln!("no todo with id {id}"),
            },
            Command::Delete(id) => {
                if page.view().item(id).is_none() {
                    eprintln!("no todo with id {id}");
                    continue;
                }
                page.dispatch(PageEvent::Delete { id });
                print_list(page.view());
            }
            Command::Html => println!("{}", page.view().to_html()),
            Command::Help => println!("{}", command::HELP),
            Command::Quit => break,
        }
    }
}

fn print_list(view: &TodoListView) {
    for item in view.items() {
        let mark = if item.checked { "x" } else { " " };
        print!("[{mark}] {:>4}  {}", item.id, item.title);
        if let Some(description) = &item.description {
            print!(" - {description}");
        }
        println!("  ({})", item.date_label);
    }
}
