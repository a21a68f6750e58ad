use hoshimi_api::CatalogApi;
use hoshimi_core::models::{AnimeDetails, AnimeId};
use hoshimi_core::storage::StateStorage;
use hoshimi_core::{CatalogParams, Mutation, Store};

use crate::render;
use crate::{CliError, Command, Op, View};

pub async fn dispatch<A>(command: Command, store: &Store, api: &A) -> Result<(), CliError>
where
    A: CatalogApi,
    CliError: From<A::Error>,
{
    match command {
        Command::Home => {
            let (catalog, releases) = futures::join!(
                store.get_animes(api, CatalogParams::default()),
                store.get_last_releases(api)
            );
            catalog?;
            releases?;
            render::staff_picks(&store.snapshot().await.staff_picks);
            show(store, View::Releases).await;
            show(store, View::Catalog).await;
        }
        Command::Browse {
            search,
            page,
            order,
        } => {
            if search.is_some() {
                store.commit(Mutation::UpdateSearchQuery(search.clone())).await;
            }
            let is_search = search.is_some();
            let params = CatalogParams {
                order,
                page,
                genres: None,
                search,
            };
            store.get_animes(api, params).await?;
            show(store, if is_search { View::Searched } else { View::Catalog }).await;
        }
        Command::Releases => {
            store.get_last_releases(api).await?;
            show(store, View::Releases).await;
        }
        Command::Details { id } => {
            let details = store.get_anime_details(api, id).await?;
            render::details(&details);
        }
        Command::Links { slug, episode } => {
            let links = store.load_video_links(api, &slug, episode).await?;
            render::mirrors(&links);
        }
        Command::Genre { op, id } => {
            let mutation = match op {
                Op::Add => Mutation::AddPreferredGenre(id),
                Op::Remove => Mutation::RemovePreferredGenre(id),
            };
            store.commit(mutation).await;
            show(store, View::Genres).await;
        }
        Command::Favorite { op, id } => {
            let mutation = match op {
                Op::Add => Mutation::AddToFavorites(known_details(store, api, id).await?),
                Op::Remove => Mutation::RemoveFromFavorites(id),
            };
            store.commit(mutation).await;
            show(store, View::Favorites).await;
        }
        Command::Watching { op, id } => {
            let mutation = match op {
                Op::Add => Mutation::AddToWatching(known_details(store, api, id).await?),
                Op::Remove => Mutation::RemoveFromWatching(id),
            };
            store.commit(mutation).await;
            show(store, View::Watching).await;
        }
        Command::Progress {
            id,
            episode,
            seconds,
        } => {
            if !store.read(|s| s.animes_w_details.contains_key(&id)).await {
                return Err(CliError::Usage(format!(
                    "no details for anime {id}; run `hoshimi details {id}` first"
                )));
            }
            store
                .commit(Mutation::SetCurrentTime {
                    anime: id,
                    episode,
                    time: seconds,
                })
                .await;
        }
        Command::Show { view } => show(store, view).await,
        Command::Window { mode } => store.commit(Mutation::SetWindowMode(mode)).await,
        Command::Reset => {
            return Err(CliError::Usage("reset runs before the store is opened".into()));
        }
    }
    Ok(())
}

/// Drop the persisted state tree under `key`. The next run starts fresh.
pub fn reset(storage: &StateStorage, key: &str) -> Result<(), CliError> {
    storage.clear(key)?;
    println!("Persisted state cleared.");
    Ok(())
}

/// The stored detail record for `id`, fetching it if this anime was never opened.
async fn known_details<A>(store: &Store, api: &A, id: AnimeId) -> Result<AnimeDetails, CliError>
where
    A: CatalogApi,
    CliError: From<A::Error>,
{
    match store.read(|s| s.animes_w_details.get(&id).cloned()).await {
        Some(details) => Ok(details),
        None => Ok(store.get_anime_details(api, id).await?),
    }
}

async fn show(store: &Store, view: View) {
    match view {
        View::Catalog => match store.filtered_animes().await {
            Some(animes) => render::animes("Catalog", &animes),
            None => println!("Catalog not loaded yet."),
        },
        View::Searched => render::animes("Search results", &store.searched().await),
        View::Favorites => render::views("Favorites", &store.favorite_animes().await),
        View::Watching => match store.currently_watching().await {
            Some(views) => render::views("Watching", &views),
            None => println!("Nothing being watched."),
        },
        View::Picks => render::staff_picks(&store.snapshot().await.staff_picks),
        View::Genres => {
            let genres = store.read(|s| s.preferred_genres.clone()).await;
            render::genres(&genres);
        }
        View::Releases => match store.read(|s| s.last_releases.clone()).await {
            Some(releases) => render::releases(&releases),
            None => println!("Releases not loaded yet."),
        },
    }
}
