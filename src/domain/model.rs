use serde::{Deserialize, Serialize};
use std::fmt;

/// A line in the shopping cart. Prices are whole Chilean pesos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub name: String,
    pub price: i64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub stock: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> i64 {
        self.price * i64::from(self.quantity)
    }
}

/// Admin user record kept while the admin panel session is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id_usuario: u64,
    pub username: String,
    pub nombres: String,
    pub id_rol: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pendiente,
    Confirmado,
    Enviado,
    Entregado,
    Cancelado,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pendiente,
        OrderStatus::Confirmado,
        OrderStatus::Enviado,
        OrderStatus::Entregado,
        OrderStatus::Cancelado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "pendiente",
            OrderStatus::Confirmado => "confirmado",
            OrderStatus::Enviado => "enviado",
            OrderStatus::Entregado => "entregado",
            OrderStatus::Cancelado => "cancelado",
        }
    }

    /// Label shown in the admin order table.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "Pendiente",
            OrderStatus::Confirmado => "Confirmado",
            OrderStatus::Enviado => "Enviado",
            OrderStatus::Entregado => "Entregado",
            OrderStatus::Cancelado => "Cancelado",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Exito,
    Fallido,
    Anulado,
    /// Anything the gateway sent that we do not recognise, kept verbatim.
    Desconocido(String),
}

/// Result data carried by the gateway callback query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub status: PaymentStatus,
    pub orden: Option<String>,
    pub monto: Option<i64>,
    pub mensaje: Option<String>,
}

impl PaymentOutcome {
    /// Parses `estado`, `orden`, `monto` and `mensaje` out of a raw query string
    /// (with or without the leading `?`). First occurrence wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut estado = None;
        let mut orden = None;
        let mut monto = None;
        let mut mensaje = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "estado" if estado.is_none() => estado = Some(value.into_owned()),
                "orden" if orden.is_none() => orden = Some(value.into_owned()),
                "monto" if monto.is_none() => monto = value.trim().parse::<i64>().ok(),
                "mensaje" if mensaje.is_none() => mensaje = Some(value.into_owned()),
                _ => {}
            }
        }

        let status = match estado.as_deref() {
            Some("exito") => PaymentStatus::Exito,
            Some("fallido") => PaymentStatus::Fallido,
            Some("anulado") => PaymentStatus::Anulado,
            other => PaymentStatus::Desconocido(other.unwrap_or_default().to_string()),
        };

        Self {
            status,
            orden,
            monto,
            mensaje,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Exito
    }
}
