/// Creates a [`TestContext`](crate::TestContext) with only the given entity tables.
#[macro_export]
macro_rules! test_setup_with_tables {
    () => {{
        $crate::TestContext::new().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = $crate::TestContext::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

/// Creates a [`TestContext`](crate::TestContext) with the user tables plus any extra entities.
#[macro_export]
macro_rules! test_setup_with_user_tables {
    ($($entity:expr),* $(,)?) => {{
        async {
            let setup = $crate::TestContext::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                schema.create_table_from_entity(entity::prelude::EveCorporation),
                schema.create_table_from_entity(entity::prelude::EveCharacter),
                schema.create_table_from_entity(entity::prelude::RecruitUser),
                schema.create_table_from_entity(entity::prelude::RecruitUserCharacter),
                $(schema.create_table_from_entity($entity),)*
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}
