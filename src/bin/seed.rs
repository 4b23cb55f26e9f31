use pizzeria_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    services::auth_service::hash_password,
};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Ensure migrations are applied.
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    seed_catalog(&pool).await?;
    let user_id = ensure_user(&pool, "user@example.com", "user123").await?;

    println!("Seed completed. Demo user ID: {user_id}");
    Ok(())
}

async fn ensure_user(pool: &sqlx::PgPool, email: &str, password: &str) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, phone, password_hash)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind("Demo User")
    .bind(email)
    .bind("+7 999 999-99-99")
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    // If user already exists, fetch id
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };
    Ok(user_id)
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let dough = [
        (1, "Thin", "dough/light.svg", "Thin crust, crispy edges", 300_i64),
        (2, "Thick", "dough/large.svg", "Fluffy classic crust", 300),
    ];
    for (id, name, image, description, price) in dough {
        sqlx::query(
            "INSERT INTO dough (id, name, image, description, price) VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(name)
        .bind(image)
        .bind(description)
        .bind(price)
        .execute(pool)
        .await?;
    }

    let sizes = [
        (1, "23 cm", "diameter.svg", 1.0_f64),
        (2, "32 cm", "diameter.svg", 2.0),
        (3, "45 cm", "diameter.svg", 3.0),
    ];
    for (id, name, image, multiplier) in sizes {
        sqlx::query(
            "INSERT INTO sizes (id, name, image, multiplier) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(name)
        .bind(image)
        .bind(multiplier)
        .execute(pool)
        .await?;
    }

    let sauces = [(1, "Tomato", 50_i64), (2, "Creamy", 50)];
    for (id, name, price) in sauces {
        sqlx::query("INSERT INTO sauces (id, name, price) VALUES ($1, $2, $3) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .bind(name)
            .bind(price)
            .execute(pool)
            .await?;
    }

    let ingredients = [
        (1, "Mushrooms", "filling/mushrooms.svg", 33_i64),
        (2, "Cheddar", "filling/cheddar.svg", 42),
        (3, "Salami", "filling/salami.svg", 42),
        (4, "Ham", "filling/ham.svg", 42),
        (5, "Pineapple", "filling/ananas.svg", 25),
        (6, "Bacon", "filling/bacon.svg", 42),
        (7, "Onion", "filling/onion.svg", 21),
        (8, "Chile", "filling/chile.svg", 21),
        (9, "Jalapeno", "filling/jalapeno.svg", 25),
        (10, "Olives", "filling/olives.svg", 25),
        (11, "Tomatoes", "filling/tomatoes.svg", 35),
        (12, "Salmon", "filling/salmon.svg", 50),
        (13, "Mozzarella", "filling/mozzarella.svg", 35),
        (14, "Parmesan", "filling/parmesan.svg", 35),
        (15, "Blue cheese", "filling/blue_cheese.svg", 50),
    ];
    for (id, name, image, price) in ingredients {
        sqlx::query(
            "INSERT INTO ingredients (id, name, image, price) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(name)
        .bind(image)
        .bind(price)
        .execute(pool)
        .await?;
    }

    let misc = [
        (1, "Cola-Cola 0.5 l", "cola.svg", 56_i64),
        (2, "Onion rings", "onion.svg", 29),
        (3, "Potato wedges", "potato.svg", 170),
    ];
    for (id, name, image, price) in misc {
        sqlx::query(
            "INSERT INTO misc (id, name, image, price) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(name)
        .bind(image)
        .bind(price)
        .execute(pool)
        .await?;
    }

    // explicit ids above leave the SERIAL sequences behind
    for table in ["dough", "sizes", "sauces", "ingredients", "misc"] {
        sqlx::query(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), (SELECT MAX(id) FROM {table}))"
        ))
        .execute(pool)
        .await?;
    }

    println!("Seeded catalog");
    Ok(())
}
