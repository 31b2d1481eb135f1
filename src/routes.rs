use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use cookie::Cookie;
use tracing::debug;

use crate::{
    AppState,
    entities::movie,
    error::{AppError, AppResult},
    models::{self, AddForm, EditErrors, EditForm, NewMovie},
    templates, tmdb,
};

const FLASH_COOKIE: &str = "flash";

pub async fn index(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let entries = models::assign_ranks(state.store.list_by_rating().await?);
    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(templates::index_page(&entries, flash.as_deref()))))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page("", None))
}

pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> AppResult<Html<String>> {
    match form.validate() {
        Ok(title) => {
            let results = state.tmdb.search_movies(&title).await?;
            Ok(Html(templates::select_page(&title, &results)))
        },
        Err(message) => Ok(Html(templates::add_page(&form.title, Some(message)))),
    }
}

pub async fn select(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(tmdb_id): Path<i64>,
) -> AppResult<(SignedCookieJar, Redirect)> {
    let details = state.tmdb.movie_details(tmdb_id).await?;

    if let Some(existing) = state.store.find_by_title(&details.original_title).await? {
        let jar = set_flash(jar, &format!("{} is already in your catalog", existing.title));
        return Ok((jar, Redirect::to(&format!("/edit/{}", existing.id))));
    }

    let year = tmdb::release_year(&details.release_date)?;
    let image_url = details
        .poster_path
        .as_deref()
        .map(|path| tmdb::image_url(&state.config.tmdb_image_base, path))
        .unwrap_or_default();

    let movie = state
        .store
        .insert(NewMovie {
            title: details.original_title,
            year,
            description: details.overview,
            image_url,
        })
        .await?;

    debug!(id = movie.id, title = %movie.title, "added movie");

    let jar = set_flash(jar, &format!("Added {}", movie.title));
    Ok((jar, Redirect::to(&format!("/edit/{}", movie.id))))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let movie = find_movie(&state, id).await?;
    let form = EditForm::prefill(&movie);
    Ok(Html(templates::edit_page(&movie, &form, &EditErrors::default())))
}

pub async fn update(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i32>,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let movie = find_movie(&state, id).await?;

    match form.validate() {
        Ok((rating, review)) => {
            state.store.update_rating_review(id, rating, &review).await?;
            let jar = set_flash(jar, &format!("Updated {}", movie.title));
            Ok((jar, Redirect::to("/")).into_response())
        },
        Err(errors) => Ok(Html(templates::edit_page(&movie, &form, &errors)).into_response()),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i32>,
) -> AppResult<(SignedCookieJar, Redirect)> {
    let removed = state.store.delete(id).await?;
    let jar = set_flash(jar, &format!("Removed {}", removed.title));
    Ok((jar, Redirect::to("/")))
}

async fn find_movie(state: &AppState, id: i32) -> AppResult<movie::Model> {
    state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("movie {id}")))
}

// Flash messages ride a signed cookie across the post-mutation
// redirect; values are percent-encoded to stay cookie-safe.

fn set_flash(jar: SignedCookieJar, message: &str) -> SignedCookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, urlencoding::encode(message).into_owned()))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::minutes(10))
        .build();
    jar.add(cookie)
}

fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    let message = jar.get(FLASH_COOKIE).map(|cookie| {
        urlencoding::decode(cookie.value())
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| cookie.value().to_string())
    });
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, message)
}
