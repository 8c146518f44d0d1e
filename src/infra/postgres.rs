//! Hosted relational service (PostgreSQL).

use super::db::{column_index, DbConnection, DbValue, Dialect, Row};
use crate::error::AppError;
use bytes::BytesMut;
use postgres::types::{to_sql_checked, IsNull, ToSql, Type};
use postgres::{Client, NoTls};
use std::error::Error;

pub struct PgConnection {
    client: Client,
}

impl PgConnection {
    pub fn connect(url: &str) -> Result<Self, AppError> {
        let client = Client::connect(url, NoTls).map_err(|e| AppError::Connection(e.to_string()))?;
        Ok(Self { client })
    }
}

/// Rewrites `?` placeholders to `$1, $2, ...`, leaving quoted text alone.
pub fn rewrite_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut n = 0;
    let mut quote: Option<char> = None;
    for c in sql.chars() {
        match (quote, c) {
            (Some(q), _) if c == q => {
                quote = None;
                out.push(c);
            }
            (Some(_), _) => out.push(c),
            (None, '\'') | (None, '"') => {
                quote = Some(c);
                out.push(c);
            }
            (None, '?') => {
                n += 1;
                out.push('$');
                out.push_str(&n.to_string());
            }
            (None, _) => out.push(c),
        }
    }
    out
}

impl ToSql for DbValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match (self, ty.name()) {
            (DbValue::Null, _) => Ok(IsNull::Yes),
            (DbValue::Integer(v), "int2") => i16::try_from(*v)?.to_sql(ty, out),
            (DbValue::Integer(v), "int4") => i32::try_from(*v)?.to_sql(ty, out),
            (DbValue::Integer(v), "int8") => v.to_sql(ty, out),
            (DbValue::Real(v), "float4") => (*v as f32).to_sql(ty, out),
            (DbValue::Real(v), "float8") => v.to_sql(ty, out),
            (DbValue::Text(s), "text" | "varchar" | "bpchar" | "name") => {
                s.as_str().to_sql(ty, out)
            }
            (DbValue::Bool(b), "bool") => b.to_sql(ty, out),
            (DbValue::Timestamp(t), "timestamp") => t.to_sql(ty, out),
            (value, name) => Err(format!("cannot bind {:?} to a {} parameter", value, name).into()),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

fn column_value(row: &postgres::Row, i: usize, ty: &Type) -> Result<DbValue, AppError> {
    let value = match ty.name() {
        "bool" => row.try_get::<_, Option<bool>>(i)?.map(DbValue::Bool),
        "int2" => row
            .try_get::<_, Option<i16>>(i)?
            .map(|v| DbValue::Integer(v.into())),
        "int4" => row
            .try_get::<_, Option<i32>>(i)?
            .map(|v| DbValue::Integer(v.into())),
        "int8" => row.try_get::<_, Option<i64>>(i)?.map(DbValue::Integer),
        "float4" => row
            .try_get::<_, Option<f32>>(i)?
            .map(|v| DbValue::Real(v.into())),
        "float8" => row.try_get::<_, Option<f64>>(i)?.map(DbValue::Real),
        "timestamp" => row
            .try_get::<_, Option<chrono::NaiveDateTime>>(i)?
            .map(DbValue::Timestamp),
        "text" | "varchar" | "bpchar" | "name" => {
            row.try_get::<_, Option<String>>(i)?.map(DbValue::Text)
        }
        other => {
            return Err(AppError::Db(format!("unsupported column type: {}", other)));
        }
    };
    Ok(value.unwrap_or(DbValue::Null))
}

fn bind(params: &[DbValue]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
}

impl DbConnection for PgConnection {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn execute(&mut self, sql: &str, params: &[DbValue]) -> Result<u64, AppError> {
        Ok(self
            .client
            .execute(rewrite_placeholders(sql).as_str(), &bind(params))?)
    }

    fn execute_batch(&mut self, sql: &str) -> Result<(), AppError> {
        self.client.batch_execute(sql)?;
        Ok(())
    }

    fn fetch(&mut self, sql: &str, params: &[DbValue]) -> Result<Vec<Row>, AppError> {
        let rows = self
            .client
            .query(rewrite_placeholders(sql).as_str(), &bind(params))?;
        let Some(first) = rows.first() else {
            return Ok(Vec::new());
        };
        let columns = column_index(first.columns().iter().map(|c| c.name().to_string()));
        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut values = Vec::with_capacity(row.len());
            for (i, col) in row.columns().iter().enumerate() {
                values.push(column_value(row, i, col.type_())?);
            }
            out.push(Row::new(columns.clone(), values));
        }
        Ok(out)
    }

    fn close(self: Box<Self>) -> Result<(), AppError> {
        self.client.close()?;
        Ok(())
    }
}
