use hoshimi_core::models::{Anime, AnimeDetails, AnimeView, GenreId, Mirror, Release};
use hoshimi_core::seed::StaffPick;

pub fn animes(heading: &str, animes: &[Anime]) {
    println!("{heading} ({})", animes.len());
    for anime in animes {
        let score = anime
            .score
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|| "-".into());
        println!("  {:>6}  {:<48} {score:>5}", anime.id, anime.title);
    }
}

pub fn views(heading: &str, views: &[AnimeView]) {
    println!("{heading} ({})", views.len());
    for view in views {
        let genres: Vec<&str> = view.genres.iter().map(|g| g.name.as_str()).collect();
        println!("  {:>6}  {:<48} {}", view.id, view.title, genres.join(", "));
    }
}

pub fn releases(releases: &[Release]) {
    println!("Latest releases ({})", releases.len());
    for release in releases {
        println!(
            "  {:<19}  {:<48} ep {}",
            release.released_at, release.title, release.episode_number
        );
    }
}

pub fn staff_picks(picks: &[StaffPick]) {
    println!("Staff picks");
    for pick in picks {
        println!("  {:>6}  {}", pick.id, pick.title);
    }
}

pub fn genres(genres: &[GenreId]) {
    if genres.is_empty() {
        println!("No preferred genres.");
    } else {
        let ids: Vec<String> = genres.iter().map(|g| g.to_string()).collect();
        println!("Preferred genres: {}", ids.join(", "));
    }
}

pub fn details(details: &AnimeDetails) {
    let info = &details.info;
    println!("{} [{}]", info.title, info.slug);
    if let Some(ref synopsis) = info.synopsis {
        println!("\n{synopsis}\n");
    }
    for episode in &details.episodes {
        let title = episode.info.title.as_deref().unwrap_or("");
        match episode.current_time {
            Some(t) => println!("  ep {:>4}  {title:<40} at {}", episode.info.episode, clock(t)),
            None => println!("  ep {:>4}  {title}", episode.info.episode),
        }
    }
}

pub fn mirrors(mirrors: &[Mirror]) {
    for mirror in mirrors {
        println!("  {:>5}p  {:<16} {}", mirror.quality, mirror.host.name, mirror.embed_url());
    }
}

/// `h:mm:ss` / `m:ss` playback position.
fn clock(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
