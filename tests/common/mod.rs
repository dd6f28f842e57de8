#![allow(dead_code)]

use std::time::Duration;

use marquee::{
    MovieCatalog, db,
    entities::{actor, director, genre, movie, movie_actor, movie_director, movie_genre},
};
use sea_orm::{DatabaseConnection, EntityTrait, Set};

pub const ACTION: i32 = 1;
pub const SCIENCE_FICTION: i32 = 2;
pub const DRAMA: i32 = 3;
pub const CRIME: i32 = 4;

pub const THE_MATRIX: i32 = 603;
pub const BLADE_RUNNER: i32 = 78;
pub const HEAT: i32 = 949;
pub const THE_GODFATHER: i32 = 238;
pub const ALIEN: i32 = 348;
pub const PULP_FICTION: i32 = 680;
pub const INTERSTELLAR: i32 = 157336;

pub const SEEDED_MOVIES: u64 = 7;

/// A fresh, migrated in-memory database. One connection, so every query sees
/// the same database.
pub async fn connect() -> DatabaseConnection {
    db::connect_and_migrate("sqlite::memory:", 1, Duration::from_secs(5))
        .await
        .expect("in-memory database")
}

/// A catalog whose pool has been closed, so every store access fails.
pub async fn closed_catalog() -> MovieCatalog {
    let db = connect().await;
    let catalog = MovieCatalog::new(db.clone());
    db.close().await.expect("close pool");
    catalog
}

pub async fn seeded_catalog() -> MovieCatalog {
    let db = connect().await;
    seed(&db).await;
    MovieCatalog::new(db)
}

struct Fixture {
    id: i32,
    title: &'static str,
    release_date: &'static str,
    vote_average: f64,
    genres: &'static [i32],
    actors: &'static [i32],
    directors: &'static [i32],
}

const FIXTURES: &[Fixture] = &[
    Fixture {
        id: THE_MATRIX,
        title: "The Matrix",
        release_date: "1999-03-31",
        vote_average: 8.2,
        genres: &[ACTION, SCIENCE_FICTION],
        actors: &[1, 2],
        directors: &[1, 2],
    },
    Fixture {
        id: BLADE_RUNNER,
        title: "Blade Runner",
        release_date: "1982-06-25",
        vote_average: 7.9,
        genres: &[SCIENCE_FICTION, DRAMA],
        actors: &[3],
        directors: &[3],
    },
    Fixture {
        id: HEAT,
        title: "Heat",
        release_date: "1995-12-15",
        vote_average: 7.9,
        genres: &[ACTION, CRIME, DRAMA],
        actors: &[4, 5],
        directors: &[4],
    },
    Fixture {
        id: THE_GODFATHER,
        title: "The Godfather",
        release_date: "1972-03-14",
        vote_average: 8.7,
        genres: &[CRIME, DRAMA],
        actors: &[4, 6],
        directors: &[5],
    },
    Fixture {
        id: ALIEN,
        title: "Alien",
        release_date: "1979-05-25",
        vote_average: 8.1,
        genres: &[SCIENCE_FICTION],
        actors: &[7],
        directors: &[3],
    },
    Fixture {
        id: PULP_FICTION,
        title: "Pulp Fiction",
        release_date: "1994-09-10",
        vote_average: 8.5,
        genres: &[CRIME],
        actors: &[],
        directors: &[6],
    },
    Fixture {
        id: INTERSTELLAR,
        title: "Interstellar",
        release_date: "2014-11-05",
        vote_average: 8.4,
        genres: &[SCIENCE_FICTION, DRAMA],
        actors: &[8],
        directors: &[7],
    },
];

const GENRES: &[(i32, &str)] =
    &[(ACTION, "Action"), (SCIENCE_FICTION, "Science Fiction"), (DRAMA, "Drama"), (CRIME, "Crime")];

const ACTORS: &[(i32, &str)] = &[
    (1, "Keanu Reeves"),
    (2, "Carrie-Anne Moss"),
    (3, "Harrison Ford"),
    (4, "Al Pacino"),
    (5, "Robert De Niro"),
    (6, "Marlon Brando"),
    (7, "Sigourney Weaver"),
    (8, "Matthew McConaughey"),
];

const DIRECTORS: &[(i32, &str)] = &[
    (1, "Lana Wachowski"),
    (2, "Lilly Wachowski"),
    (3, "Ridley Scott"),
    (4, "Michael Mann"),
    (5, "Francis Ford Coppola"),
    (6, "Quentin Tarantino"),
    (7, "Christopher Nolan"),
];

pub async fn seed(db: &DatabaseConnection) {
    genre::Entity::insert_many(
        GENRES.iter().map(|&(id, name)| genre::ActiveModel { id: Set(id), name: Set(name.into()) }),
    )
    .exec(db)
    .await
    .expect("genres");

    actor::Entity::insert_many(
        ACTORS.iter().map(|&(id, name)| actor::ActiveModel { id: Set(id), name: Set(name.into()) }),
    )
    .exec(db)
    .await
    .expect("actors");

    director::Entity::insert_many(
        DIRECTORS
            .iter()
            .map(|&(id, name)| director::ActiveModel { id: Set(id), name: Set(name.into()) }),
    )
    .exec(db)
    .await
    .expect("directors");

    for f in FIXTURES {
        movie::Entity::insert(movie::ActiveModel {
            id: Set(f.id),
            title: Set(f.title.into()),
            overview: Set(format!("Overview of {}.", f.title)),
            release_date: Set(f.release_date.into()),
            poster_path: Set(Some(format!("/posters/{}.jpg", f.id))),
            backdrop_path: Set(None),
            popularity: Set(f64::from(f.id % 100)),
            vote_average: Set(f.vote_average),
            vote_count: Set(1_000 + i64::from(f.id % 1_000)),
            created_at: Set(1_700_000_000),
            updated_at: Set(1_700_000_000),
        })
        .exec(db)
        .await
        .expect("movie");

        for &genre_id in f.genres {
            movie_genre::Entity::insert(movie_genre::ActiveModel {
                movie_id: Set(f.id),
                genre_id: Set(genre_id),
            })
            .exec(db)
            .await
            .expect("movie_genre");
        }
        for &actor_id in f.actors {
            movie_actor::Entity::insert(movie_actor::ActiveModel {
                movie_id: Set(f.id),
                actor_id: Set(actor_id),
            })
            .exec(db)
            .await
            .expect("movie_actor");
        }
        for &director_id in f.directors {
            movie_director::Entity::insert(movie_director::ActiveModel {
                movie_id: Set(f.id),
                director_id: Set(director_id),
            })
            .exec(db)
            .await
            .expect("movie_director");
        }
    }
}
