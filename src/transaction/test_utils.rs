//! Fixtures shared by the transaction and analytics tests.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::db::initialize;

use super::{NewTransaction, Transaction, create_transaction};

pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

pub(crate) fn new_sale(
    price: f64,
    sold: bool,
    date_of_sale: OffsetDateTime,
    category: &str,
) -> NewTransaction {
    NewTransaction {
        title: format!("{category} item"),
        description: format!("A {category} item priced at {price}"),
        price,
        category: category.to_owned(),
        sold,
        date_of_sale,
        image: "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg".to_owned(),
    }
}

#[track_caller]
pub(crate) fn insert_sales(sales: Vec<NewTransaction>, conn: &Connection) -> Vec<Transaction> {
    sales
        .into_iter()
        .map(|sale| create_transaction(sale, conn).expect("Could not create transaction"))
        .collect()
}
