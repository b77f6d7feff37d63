use lodgera_core::{
    models::{Expense, ExpenseForm},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for operating expenses
#[derive(Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, form), fields(db.table = "expenses", db.operation = "insert"))]
    pub async fn create(&self, form: &ExpenseForm) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<Postgres, Expense>(
            r#"
            INSERT INTO expenses (title, amount, category, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, amount, category, notes, created_at
            "#,
        )
        .bind(&form.title)
        .bind(form.amount)
        .bind(&form.category)
        .bind(&form.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    #[tracing::instrument(skip(self), fields(db.table = "expenses", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<Postgres, Expense>(
            "SELECT id, title, amount, category, notes, created_at FROM expenses ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    #[tracing::instrument(skip(self, form), fields(db.table = "expenses", db.operation = "update", db.record_id = %id))]
    pub async fn update(&self, id: Uuid, form: &ExpenseForm) -> Result<(), AppError> {
        let rows_affected = sqlx::query(
            "UPDATE expenses SET title = $1, amount = $2, category = $3, notes = $4 WHERE id = $5",
        )
        .bind(&form.title)
        .bind(form.amount)
        .bind(&form.category)
        .bind(&form.notes)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound("Expense not found".to_string()));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "expenses", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let rows_affected = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound("Expense not found".to_string()));
        }

        Ok(())
    }
}
