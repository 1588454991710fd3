// Prompt and template constants for biography generation.
// Output is Spanish: the adoption dataset and its readers are.

/// Output bound for a service-mode biography.
pub const MAX_OUTPUT_TOKENS: u32 = 100;

/// Sampling temperature for service-mode biographies.
pub const TEMPERATURE: f32 = 0.7;

/// System instruction for the completion service.
pub const BIOGRAPHY_SYSTEM: &str = "Actúas como un redactor de biografía de adopción experto, \
    creando textos emocionales y concisos.";

/// User prompt template. Replace `{request}` with the wire-form request.
pub const BIOGRAPHY_PROMPT_TEMPLATE: &str = r#"Eres un redactor de biografía para una app de adopción de mascotas.
Tu objetivo es convertir los datos crudos en una biografía emocional y atractiva,
máximo 60 palabras.
Asegúrate de incluir su Condición Especial y la REGLA OBLIGATORIA más importante.

Datos del Animal (Nombre;Raza;Edad;Condición Especial;Apto Con):
{request}

Tu biografía debe seguir este formato:
Nombre (Edad) es una [Especie] [Raza] con... [Aquí la biografía emocionante, usando la Condición Especial y la regla de Apto Con]."#;

/// Local biography for an animal with a special condition.
/// Replace: {name}, {age}, {breed}, {condition}
pub const LOCAL_TEMPLATE: &str = "SIMULACIÓN: {name} ({age} años) es un/a encantador/a {breed} \
    con una Condición Especial: **{condition}**. Está listo/a para el amor y \
    necesita un humano que entienda su régimen de cuidado y paciencia.";

/// Local biography for an animal without a special condition.
/// Replace: {name}, {age}, {breed}
pub const LOCAL_TEMPLATE_NO_CONDITION: &str = "SIMULACIÓN: {name} ({age} años) es un/a \
    encantador/a {breed}. Está listo/a para el amor y necesita un humano que le \
    dé cariño y paciencia.";
