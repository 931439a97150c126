// ============================
// axelsub-backend-lib/src/seed.rs
// ============================
//! Demo seed data: the admin account and two seeded shares.

use tracing::info;

use crate::auth::password;
use crate::error::AppError;
use crate::storage::{NewAnime, NewUser, Store};

/// Seed the demo admin and starter animes, once.
///
/// Idempotent: a second startup finds the admin username and does
/// nothing.
pub async fn seed_demo_data<S: Store>(storage: &S) -> Result<(), AppError> {
    if storage
        .find_user_by_username("axel_admin")
        .await?
        .is_some()
    {
        return Ok(());
    }

    let secret = password::derive_secret("admin123")?;
    let admin = storage
        .insert_user(NewUser {
            username: "axel_admin".to_string(),
            email: "admin@axelsub.com".to_string(),
            password: secret,
            bio: Some("Administrator of AXEL SUB".to_string()),
            avatar_url: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=axel".to_string()),
            is_admin: true,
        })
        .await?;

    storage
        .insert_anime(NewAnime {
            mal_id: 1,
            title: "Cowboy Bebop".to_string(),
            description: Some(
                "In the year 2071, humanity has colonized several of the solar system's \
                 planets and moons..."
                    .to_string(),
            ),
            cover_image: Some("https://cdn.myanimelist.net/images/anime/4/19644.jpg".to_string()),
            genres: vec!["Action".to_string(), "Sci-Fi".to_string()],
            video_url:
                "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4"
                    .to_string(),
            quality: None,
            uploader_id: admin.id,
        })
        .await?;

    storage
        .insert_anime(NewAnime {
            mal_id: 20,
            title: "Naruto".to_string(),
            description: Some(
                "Moments prior to Naruto Uzumaki's birth, a huge demon known as the Kyuubi, \
                 the Nine-Tailed Fox, attacked Konohagakure..."
                    .to_string(),
            ),
            cover_image: Some("https://cdn.myanimelist.net/images/anime/13/17405.jpg".to_string()),
            genres: vec!["Action".to_string(), "Adventure".to_string()],
            video_url:
                "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4"
                    .to_string(),
            quality: None,
            uploader_id: admin.id,
        })
        .await?;

    info!("seeded demo admin and starter animes");
    Ok(())
}
