use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::movie,
    models::{EditErrors, EditForm, RankedMovie},
    tmdb::SearchResult,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 \
     focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";

pub fn index_page(entries: &[RankedMovie], flash: Option<&str>) -> String {
    page(
        "reelrank",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "reelrank" }
                            p class="mt-2 text-gray-600" { "Your movies, worst to best." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add movie" }
                    }

                    @if let Some(message) = flash {
                        div class="mt-6 rounded-md border border-green-200 bg-green-50 px-4 py-3 text-green-800" { (message) }
                    }

                    @if entries.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "Nothing here yet. Search for a movie to start the list." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for entry in entries {
                                (movie_card(entry))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(title_value: &str, error: Option<&str>) -> String {
    page(
        "Add a movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Add a movie" }
                        p class="mt-2 text-gray-600" { "Search TMDB by title, then pick the right match." }

                        form class="mt-8 space-y-6" method="post" action="/add" {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="title" { "Title" }
                                input class=(INPUT_CLASS) name="title" id="title" value=(title_value) required;
                                (field_error(error))
                            }
                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to the list" }
                    }
                }
            }
        },
    )
}

pub fn select_page(query: &str, results: &[SearchResult]) -> String {
    page(
        "Pick a match",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Pick a match" }
                        p class="mt-2 text-gray-600" { "Results for \"" (query) "\"" }

                        @if results.is_empty() {
                            p class="mt-8 text-gray-600" { "TMDB found nothing for that title." }
                        } @else {
                            ul class="mt-8 divide-y divide-gray-200" {
                                @for result in results {
                                    li {
                                        a class="flex items-baseline justify-between gap-4 py-3 hover:bg-gray-50" href=(format!("/select/{}", result.id)) {
                                            span class="font-medium text-gray-900" { (result.title) }
                                            span class="text-sm text-gray-500" {
                                                @if result.release_date.is_empty() { "—" } @else { (result.release_date) }
                                            }
                                        }
                                    }
                                }
                            }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/add" { "Search again" }
                    }
                }
            }
        },
    )
}

pub fn edit_page(movie: &movie::Model, form: &EditForm, errors: &EditErrors) -> String {
    page(
        "Edit entry",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                        p class="mt-2 text-gray-600" { "Released " (movie.year) }

                        form class="mt-8 space-y-6" method="post" action=(format!("/edit/{}", movie.id)) {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="new_rating" { "Your rating (0-10)" }
                                input class=(INPUT_CLASS) name="new_rating" id="new_rating" type="number" step="0.1" min="0" max="10" value=(form.new_rating) required;
                                (field_error(errors.rating))
                            }

                            div {
                                label class="block text-sm font-medium text-gray-700" for="new_review" { "Your review" }
                                input class=(INPUT_CLASS) name="new_review" id="new_review" value=(form.new_review) required;
                                (field_error(errors.review))
                            }

                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Save" }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to the list" }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: String) -> String {
    let heading = match status {
        StatusCode::NOT_FOUND => "Not found",
        _ => "Something went wrong",
    };

    page(
        heading,
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        p class="text-sm font-semibold text-gray-500" { (status.as_u16()) }
                        h1 class="mt-1 text-2xl font-bold text-gray-900" { (heading) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn movie_card(entry: &RankedMovie) -> Markup {
    let movie = &entry.movie;

    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex gap-6" {
                @if movie.image_url.is_empty() {
                    div class="h-36 w-24 flex-none rounded-md bg-gray-200" {}
                } @else {
                    img class="h-36 w-24 flex-none rounded-md object-cover" src=(movie.image_url) alt=(movie.title);
                }

                div class="min-w-0 flex-1" {
                    div class="flex items-start justify-between gap-4" {
                        h2 class="text-xl font-semibold text-gray-900" {
                            (movie.title)
                            span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                        }
                        span class="flex-none rounded-full bg-gray-900 px-3 py-1 text-sm font-semibold text-white" { "#" (entry.rank) }
                    }

                    p class="mt-1 text-sm font-medium text-gray-700" { (format!("{:.1}", movie.rating)) " / 10" }
                    p class="mt-2 text-sm italic text-gray-600" { (movie.review) }
                    p class="mt-2 text-sm text-gray-600 line-clamp-3" { (movie.description) }

                    div class="mt-4 flex gap-4 text-sm" {
                        a class="text-blue-600 hover:text-blue-800" href=(format!("/edit/{}", movie.id)) { "Edit" }
                        a class="text-red-600 hover:text-red-800" href=(format!("/delete/{}", movie.id)) { "Delete" }
                    }
                }
            }
        }
    }
}

fn field_error(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p class="mt-2 text-sm text-red-600" { (message) }
        }
    }
}
