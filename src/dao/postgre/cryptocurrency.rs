use sqlx::Error;

use super::QueryResult;
use crate::{
    model::{Cryptocurrency, Table},
    types::Asset,
};

impl Table<Cryptocurrency> {
    /// Insert or overwrite by `id`. `created_at` is only written on the
    /// first insert; `last_updated` is refreshed every time.
    pub async fn upsert(&self, data: &Asset) -> Result<QueryResult, Error> {
        const SQL: &str = r#"
        INSERT INTO "cryptocurrencies" (
            "id",
            "name",
            "symbol",
            "current_price",
            "market_cap",
            "total_volume",
            "price_change_percentage_24h",
            "image"
        )
        VALUES (
            $1, $2, $3,
            CAST($4 AS NUMERIC(20, 8)),
            $5, $6,
            CAST($7 AS NUMERIC(10, 4)),
            $8
        )
        ON CONFLICT ("id") DO UPDATE SET
            "name" = EXCLUDED."name",
            "symbol" = EXCLUDED."symbol",
            "current_price" = EXCLUDED."current_price",
            "market_cap" = EXCLUDED."market_cap",
            "total_volume" = EXCLUDED."total_volume",
            "price_change_percentage_24h" = EXCLUDED."price_change_percentage_24h",
            "image" = EXCLUDED."image",
            "last_updated" = NOW()
        "#;

        sqlx::query(SQL)
            .bind(&data.id)
            .bind(&data.name)
            .bind(&data.symbol)
            .bind(data.current_price)
            .bind(data.market_cap.round() as i64)
            .bind(data.total_volume.round() as i64)
            .bind(data.price_change_percentage_24h)
            .bind(&data.image)
            .execute(&self.pool)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<Asset>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "cryptocurrencies"
        ORDER BY "market_cap" DESC NULLS LAST
        "#;

        let rows: Vec<Cryptocurrency> =
            sqlx::query_as(SQL).fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Asset::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Asset>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "cryptocurrencies"
        WHERE "id" = $1
        "#;

        let row: Option<Cryptocurrency> = sqlx::query_as(SQL)
            .bind(id)
            .persistent(true)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Asset::from))
    }

    pub async fn count(&self) -> Result<i64, Error> {
        let (count,): (i64,) =
            sqlx::query_as(r#"SELECT COUNT(*) FROM "cryptocurrencies""#)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
