//! Offline replies for ordinary chat.
//!
//! The table is checked in order; the first topic with a keyword contained in
//! the lower-cased message answers. Unmatched messages get a generic reply that
//! echoes the message back.

/// One canned topic.
#[derive(Debug, Clone, Copy)]
pub struct CannedTopic {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

pub const TOPICS: &[CannedTopic] = &[
    CannedTopic {
        name: "greetings",
        keywords: &["hola", "hello", "hi", "buenos días", "buenas tardes", "saludos"],
        response: "¡Hola! Soy **VenezIA**, tu asistente inteligente de Venezia Ice Cream. ¿En qué puedo ayudarte hoy? Puedo ayudarte con ventas, inventario, producción, entregas y análisis.",
    },
    CannedTopic {
        name: "sales",
        keywords: &["ventas", "sales", "vender", "vendido", "facturación", "ingresos"],
        response: "📊 **Ventas de Hoy - Excelente Rendimiento**\n\n💰 **Ingresos actuales:** $15,450\n📦 **Órdenes procesadas:** 89\n🏆 **Sabor más vendido:** Chocolate con Almendras (23 unidades)\n📈 **Tendencia:** +18% vs ayer\n\n🎯 *Recomendación: Considera aumentar stock de Chocolate con Almendras para mañana.*",
    },
    CannedTopic {
        name: "inventory",
        keywords: &["inventario", "inventory", "stock", "reponer", "reabastecer", "productos", "falta", "agotar"],
        response: "📦 **Estado del Inventario - Alerta de Stock**\n\n🔴 **Stock Crítico:**\n• Chocolate Belga: 5 kg (Recomendado: 45 kg)\n• Vainilla Bourbon: 12 kg (Recomendado: 35 kg)\n\n🟡 **Stock Bajo:**\n• Frutilla Natural: 18 kg (Recomendado: 30 kg)\n• Dulce de Leche: 22 kg (Recomendado: 40 kg)\n\n✅ **Acción sugerida:** Crear orden de producción urgente para Chocolate y Vainilla.\n💡 *¿Quieres que genere automáticamente las órdenes de producción?*",
    },
    CannedTopic {
        name: "flavors",
        keywords: &["sabores", "flavors", "top sabores", "populares", "más vendidos"],
        response: "🍦 **Top Sabores Más Vendidos**\n\n🥇 **#1 Chocolate con Almendras**\n• 127 ventas esta semana\n• Margen: 45%\n\n🥈 **#2 Vainilla Premium**\n• 98 ventas esta semana\n• Margen: 40%\n\n🥉 **#3 Dulce de Leche**\n• 85 ventas esta semana\n• Margen: 42%\n\n💡 *Recomendación: Aumenta producción de los top 3 para el fin de semana.*",
    },
    CannedTopic {
        name: "add_stock",
        keywords: &["agregar stock", "añadir stock", "suma stock", "incrementar stock", "agreguemos", "helado"],
        response: "➕ **Agregar Stock a Productos**\n\n**Ejemplos de comandos:**\n• \"Suma 15 kg de chocolate\"\n• \"Agregar 20 litros de vainilla\"\n• \"Incrementar 10 kg de frutilla\"\n\n💡 *Solo escribe algo como \"Suma 25 kg de chocolate\" y yo lo ejecutaré automáticamente.*",
    },
    CannedTopic {
        name: "new_flavor",
        keywords: &["nuevo sabor", "crear sabor", "nuevo helado", "nueva receta"],
        response: "🆕 **Crear Nuevo Sabor de Helado**\n\n📋 **Para crear un nuevo sabor necesito:**\n• Nombre del sabor\n• Precio sugerido\n\n**Ejemplo:** \"Crear sabor Cookies & Cream precio $4000\"\n\n💡 *¿Qué sabor tienes en mente?*",
    },
    CannedTopic {
        name: "suppliers",
        keywords: &["agregar proveedor", "nuevo proveedor", "crear proveedor", "proveedores", "suppliers"],
        response: "🏢 **Gestión de Proveedores**\n\n📋 **Para agregar un proveedor necesito:**\n• Nombre de la empresa\n• Contacto principal\n• Teléfono y email\n• Productos que suministra\n\n💡 *¿Qué proveedor quieres agregar? Proporciona los detalles.*",
    },
    CannedTopic {
        name: "change_prices",
        keywords: &["cambiar precios", "actualizar precios", "modificar precios", "ajustar precios", "nuevos precios"],
        response: "💰 **Cambiar Precios de Productos**\n\n📈 **Para cambiar precios, dime:**\n• \"Cambiar precio de chocolate a $200\"\n• \"Actualizar vainilla a $190 por kg\"\n• \"Subir todos los precios 5%\"\n\n🎯 *¿Qué producto quieres ajustar y a qué precio?*",
    },
    CannedTopic {
        name: "production",
        keywords: &["producción", "production", "lotes", "fabricar", "hacer", "preparar", "cocinar", "batches"],
        response: "🏭 **Estado de Producción Actual**\n\n🔄 **Lotes en Proceso:**\n• **Lote #145** - Chocolate Premium (80%)\n• **Lote #146** - Vainilla Bourbon (45%)\n• **Lote #147** - Frutilla Natural (20%)\n\n⚡ **Capacidad disponible:** 2 máquinas libres\n🎯 *¿Necesitas programar nuevos lotes?*",
    },
    CannedTopic {
        name: "analytics",
        keywords: &["análisis", "analytics", "reporte", "estadísticas", "performance", "rendimiento", "métricas", "analiza", "heladería", "heladeria"],
        response: "📈 **Análisis de Rendimiento Semanal**\n\n🚀 **Crecimiento:** +15% en ventas\n📅 **Días pico:** Viernes y Sábado (+40%)\n\n💡 **Insights:**\n• Los fines de semana demandan 40% más helados premium\n• Las promociones de medio día aumentan ventas 25%\n\n🎯 **Recomendación:** Aumentar producción premium para el próximo fin de semana.",
    },
    CannedTopic {
        name: "deliveries",
        keywords: &["entregas", "deliveries", "delivery", "repartidores", "envíos", "distribución", "drivers"],
        response: "🚚 **Estado de Entregas del Día**\n\n📊 **Resumen General:**\n• Total programadas: 12 entregas\n• ✅ Entregadas: 8 (67%)\n• 🚛 En tránsito: 3 (25%)\n• ⏳ Pendientes: 1 (8%)\n\n🎯 *Tiempo promedio de entrega: 32 minutos*",
    },
    CannedTopic {
        name: "recommendations",
        keywords: &["recomendaciones", "recommendations", "sugerencias", "consejos", "qué hacer", "mejoras", "mejorar", "aumentar ventas"],
        response: "💡 **Recomendaciones Inteligentes Basadas en Datos**\n\n🔥 **Prioridad Alta:**\n1. **Aumentar Producción de Chocolate** - Stock crítico, alta demanda\n2. **Promocionar Sabores de Temporada**\n3. **Optimizar Rutas de Entrega**\n\n🎯 *¿Te interesa implementar alguna de estas recomendaciones?*",
    },
];

const QUESTION_MARKERS: &[&str] = &["?", "qué", "what", "how"];

/// First matching topic for `message`, if any.
pub fn topic(message: &str) -> Option<&'static CannedTopic> {
    let lower = message.to_lowercase();
    TOPICS
        .iter()
        .find(|t| t.keywords.iter().any(|k| lower.contains(*k)))
}

/// Always returns a non-empty reply.
pub fn reply(message: &str) -> String {
    if let Some(topic) = topic(message) {
        return topic.response.to_string();
    }
    let lower = message.to_lowercase();
    if QUESTION_MARKERS.iter().any(|m| lower.contains(*m)) {
        format!(
            "Entiendo que preguntas sobre \"{message}\". Como asistente AI de Venezia, puedo ayudarte con información sobre ventas, inventario, producción, entregas y análisis del negocio. ¿Podrías ser más específico sobre qué aspecto te interesa?"
        )
    } else {
        format!(
            "He procesado tu mensaje: \"{message}\". Como tu asistente AI especializado en heladería, puedo ayudarte con análisis de ventas, optimización de inventario, planificación de producción y gestión de entregas. ¿En qué área específica necesitas asistencia?"
        )
    }
}
