use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_vote_average")
                    .table(Movie::Table)
                    .col((Movie::VoteAverage, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_release_date")
                    .table(Movie::Table)
                    .col((Movie::ReleaseDate, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_popularity")
                    .table(Movie::Table)
                    .col((Movie::Popularity, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create().name("idx_genre_name").table(Genre::Table).col(Genre::Name).to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create().name("idx_actor_name").table(Actor::Table).col(Actor::Name).to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_director_name")
                    .table(Director::Table)
                    .col(Director::Name)
                    .to_owned(),
            )
            .await?;

        // Composite primary keys lead with movie_id; these cover the reverse direction.
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_genre_genre_id")
                    .table(MovieGenre::Table)
                    .col(MovieGenre::GenreId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_actor_actor_id")
                    .table(MovieActor::Table)
                    .col(MovieActor::ActorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_director_director_id")
                    .table(MovieDirector::Table)
                    .col(MovieDirector::DirectorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_movie_director_director_id").table(MovieDirector::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_movie_actor_actor_id").table(MovieActor::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_movie_genre_genre_id").table(MovieGenre::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_director_name").table(Director::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_actor_name").table(Actor::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_genre_name").table(Genre::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_movie_popularity").table(Movie::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_movie_release_date").table(Movie::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_movie_vote_average").table(Movie::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    ReleaseDate,
    Popularity,
    VoteAverage,
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Name,
}

#[derive(DeriveIden)]
enum Actor {
    Table,
    Name,
}

#[derive(DeriveIden)]
enum Director {
    Table,
    Name,
}

#[derive(DeriveIden)]
enum MovieGenre {
    Table,
    GenreId,
}

#[derive(DeriveIden)]
enum MovieActor {
    Table,
    ActorId,
}

#[derive(DeriveIden)]
enum MovieDirector {
    Table,
    DirectorId,
}
