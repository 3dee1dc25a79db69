use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;
use taskshelf_cli::admin::{NewAdmin, create_admin};
use taskshelf_cli::seeder::{self, SeedConfig};

#[derive(Parser)]
#[command(name = "taskshelf-cli")]
#[command(about = "Taskshelf CLI - Administrative tools for Taskshelf", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Username used to log in
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users and todos
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "20")]
        users: usize,

        /// Number of todos per user
        #[arg(short = 't', long, default_value = "5")]
        todos: usize,
    },
    /// Delete seeded users and their todos (keeps real accounts)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            first_name,
            last_name,
            password,
        } => handle_create_admin(&pool, username, email, first_name, last_name, password).await,
        Commands::Seed { users, todos } => handle_seed(&pool, users, todos).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

async fn connect() -> anyhow::Result<PgPool> {
    let pool = taskshelf_db::init_db_pool().await?;
    taskshelf_db::run_migrations(&pool).await?;
    Ok(pool)
}

fn prompt(value: Option<String>, label: &str) -> String {
    value.unwrap_or_else(|| {
        Input::new()
            .with_prompt(label)
            .interact_text()
            .unwrap_or_else(|e| {
                eprintln!("❌ Failed to read {}: {}", label.to_lowercase(), e);
                std::process::exit(1);
            })
    })
}

async fn handle_create_admin(
    pool: &PgPool,
    username: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
) {
    let username = prompt(username, "Username");
    let email = prompt(email, "Email address");
    let first_name = prompt(first_name, "First name");
    let last_name = prompt(last_name, "Last name");

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            })
    });

    let admin = NewAdmin {
        username: &username,
        email: &email,
        first_name: &first_name,
        last_name: &last_name,
        password: &password,
    };

    match create_admin(pool, admin).await {
        Ok(Some(id)) => {
            println!("\n✅ Admin created successfully!");
            println!("   ID: {}", id);
            println!("   Username: {}", username);
            println!("   Email: {}", email);
        }
        Ok(None) => {
            eprintln!("\n⚠️  A user with that email, username or phone number already exists");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, users: usize, todos: usize) {
    let config = SeedConfig::new(users).with_todos_per_user(todos);

    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}
