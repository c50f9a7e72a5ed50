//! Sentencias SQL de los reportes
//!
//! Todas usan parámetros posicionales (`?`); ningún valor se interpola.

/// Los 10 productos más caros
pub const TOP_PRODUCTS: &str = r#"
    SELECT PRODUCT_COD AS `Prod. Code`,
           PRODUCT_NAME AS `Product Name`,
           PRODUCT_VAL AS `Price (R$)`
    FROM data_product
    ORDER BY PRODUCT_VAL DESC
    LIMIT 10
"#;

/// Ventas totales por área de negocio en un intervalo de fechas
pub const SALES_BY_AREA: &str = r#"
    SELECT ds.BUSINESS_NAME,
           FORMAT(SUM(dss.SALES_VALUE), 2) AS Vendas_Totais
    FROM data_store_sales dss
    JOIN data_store_cad ds ON ds.STORE_CODE = dss.STORE_CODE
    WHERE dss.DATE BETWEEN ? AND ?
    GROUP BY ds.BUSINESS_NAME
"#;

/// Ventas de un producto en una tienda dentro de un intervalo
pub const PRODUCT_SALES: &str = r#"
    SELECT *
    FROM data_product_sales
    WHERE PRODUCT_CODE = ?
      AND STORE_CODE = ?
      AND DATE BETWEEN ? AND ?
"#;

/// Total de ventas por tienda, en orden numérico de código
pub const STORE_SALES_TOTALS: &str = r#"
    SELECT STORE_CODE, SUM(SALES_VALUE) AS TOTAL_VENDAS
    FROM data_store_sales
    GROUP BY STORE_CODE
    ORDER BY STORE_CODE ASC
"#;

pub const IMDB_RATINGS: &str = "SELECT rating FROM IMDB_movies";

pub const SECTION_COLUMN: &str = "SECTION_NAME";

/// Secciones distintas de los departamentos dados, un `?` por departamento
pub fn department_sections(departments: usize) -> String {
    let placeholders = vec!["?"; departments.max(1)].join(", ");
    format!(
        "SELECT DISTINCT {} FROM data_product WHERE DEP_NAME IN ({})",
        SECTION_COLUMN, placeholders
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn test_placeholder_counts() {
        assert_eq!(placeholders(TOP_PRODUCTS), 0);
        assert_eq!(placeholders(SALES_BY_AREA), 2);
        assert_eq!(placeholders(PRODUCT_SALES), 4);
        assert_eq!(placeholders(STORE_SALES_TOTALS), 0);
        assert_eq!(placeholders(IMDB_RATINGS), 0);
    }

    #[test]
    fn test_department_sections_placeholders() {
        let sql = department_sections(2);
        assert!(sql.ends_with("IN (?, ?)"));
        assert_eq!(placeholders(&department_sections(5)), 5);
    }
}
