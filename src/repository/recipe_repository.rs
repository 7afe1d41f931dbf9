//! Transactional replace-then-append for the three destination tables.
//!
//! A run fully replaces the store. Deletes run children-first
//! (`ingredients`, `nutrition`, then `recipe_info`) and share one
//! transaction with the appends, so a failure at any step rolls back
//! and leaves the previous dataset intact.

use sqlx::{QueryBuilder, SqlitePool};

use crate::aggregate::{Dataset, IngredientRow, RecipeRecord};
use crate::error::Result;
use crate::nutrition::{NutritionRecord, NUTRIENT_COLUMNS};

const CHUNK_SIZE: usize = 100;

pub struct RecipeRepository {
    pool: SqlitePool,
}

impl RecipeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Replace the contents of all three tables with `dataset`.
    ///
    /// `recipe_id` is recomputed as the 1-based row position for
    /// `recipe_info` and `nutrition`; ingredient rows carry theirs
    /// explicitly. `recipe_info` is dropped rather than emptied because
    /// its category columns are decided by the data of each run.
    pub async fn replace_all(&self, dataset: &Dataset) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM ingredients").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM nutrition").execute(&mut *tx).await?;
        sqlx::query("DROP TABLE IF EXISTS recipe_info").execute(&mut *tx).await?;

        let category_columns: Vec<String> =
            dataset.categories.names().map(quote_ident).collect();
        sqlx::query(&create_recipe_info_sql(&category_columns))
            .execute(&mut *tx)
            .await?;

        self.append_recipe_info(&mut tx, dataset, &category_columns).await?;
        self.append_nutrition(&mut tx, &dataset.nutrition).await?;
        self.append_ingredients(&mut tx, &dataset.ingredients).await?;

        tx.commit().await?;

        log::info!(
            "[LOAD] Replaced store: {} recipes, {} nutrition rows, {} ingredient rows, {} category columns",
            dataset.recipes.len(),
            dataset.nutrition.len(),
            dataset.ingredients.len(),
            category_columns.len(),
        );
        Ok(())
    }

    async fn append_recipe_info(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        dataset: &Dataset,
        category_columns: &[String],
    ) -> Result<()> {
        let mut columns =
            String::from(r#"recipe_id, "RecipeName", "RecipeLink", "CookingTime""#);
        for name in category_columns {
            columns.push_str(", ");
            columns.push_str(name);
        }

        let rows: Vec<(usize, &RecipeRecord)> = dataset.recipes.iter().enumerate().collect();
        for chunk in rows.chunks(CHUNK_SIZE) {
            let mut qb = QueryBuilder::new(format!("INSERT INTO recipe_info ({columns}) "));
            qb.push_values(chunk, |mut b, (idx, recipe)| {
                b.push_bind(*idx as i64 + 1)
                    .push_bind(&recipe.name)
                    .push_bind(&recipe.link)
                    .push_bind(&recipe.cooking_time);
                for status in dataset.categories.row(*idx) {
                    b.push_bind(status);
                }
            });
            qb.build().execute(&mut **tx).await?;
        }
        Ok(())
    }

    async fn append_nutrition(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        records: &[NutritionRecord],
    ) -> Result<()> {
        let columns = NUTRIENT_COLUMNS
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");

        let rows: Vec<(usize, &NutritionRecord)> = records.iter().enumerate().collect();
        for chunk in rows.chunks(CHUNK_SIZE) {
            let mut qb =
                QueryBuilder::new(format!("INSERT INTO nutrition (recipe_id, {columns}) "));
            qb.push_values(chunk, |mut b, (idx, record)| {
                b.push_bind(*idx as i64 + 1);
                for value in record.columns() {
                    b.push_bind(value.clone());
                }
            });
            qb.build().execute(&mut **tx).await?;
        }
        Ok(())
    }

    async fn append_ingredients(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        rows: &[IngredientRow],
    ) -> Result<()> {
        for chunk in rows.chunks(CHUNK_SIZE) {
            let mut qb =
                QueryBuilder::new(r#"INSERT INTO ingredients (recipe_id, "Ingredient") "#);
            qb.push_values(chunk, |mut b, row| {
                b.push_bind(row.recipe_id as i64).push_bind(&row.ingredient);
            });
            qb.build().execute(&mut **tx).await?;
        }
        Ok(())
    }
}

fn create_recipe_info_sql(category_columns: &[String]) -> String {
    let mut sql = String::from(
        r#"CREATE TABLE recipe_info (recipe_id INTEGER PRIMARY KEY, "RecipeName" TEXT, "RecipeLink" TEXT, "CookingTime" TEXT"#,
    );
    for name in category_columns {
        sql.push_str(", ");
        sql.push_str(name);
        sql.push_str(" TEXT");
    }
    sql.push(')');
    sql
}

/// Quote a dynamic column name, stripping any embedded double quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', ""))
}
